use std::sync::Arc;

use config::Config;

use crate::cache::FormTokenStore;

pub mod cache;
pub mod common;
pub mod config;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod utils;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub form_tokens: Arc<FormTokenStore>,
}
