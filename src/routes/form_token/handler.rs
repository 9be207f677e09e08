use axum::{extract::State, http::StatusCode, response::IntoResponse};

use crate::{AppState, utils::success_to_api_response};

use super::model::IssueFormTokenResponse;

/// 签发一次性表单令牌
///
/// 任何客户端都可以请求，令牌在有效期内只能被消费一次。
#[axum::debug_handler]
pub async fn issue_form_token(State(state): State<AppState>) -> impl IntoResponse {
    let (form_token, expires_in) = state.form_tokens.issue().await;

    (
        StatusCode::OK,
        success_to_api_response(IssueFormTokenResponse {
            form_token,
            expires_in,
        }),
    )
}
