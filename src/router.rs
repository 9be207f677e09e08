use axum::{Router, routing::get};

use crate::{AppState, middleware::require_form_token, routes};

/// 组装服务路由
///
/// 一次性令牌校验挂在整个API路由上，GET 请求（含令牌签发接口）天然放行。
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/ping", get(routes::system::ping))
        .route("/form-token", get(routes::form_token::issue_form_token))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_form_token,
        ));

    Router::new()
        .nest(&state.config.api_base_uri, api_routes)
        .with_state(state)
}
