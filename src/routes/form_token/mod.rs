mod handler;
mod model;

pub use handler::issue_form_token;
