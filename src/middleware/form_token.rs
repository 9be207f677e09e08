use axum::{
    body::{Body, to_bytes},
    extract::State,
    http::{Method, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::{
    AppState,
    utils::{error_codes, error_to_api_response},
};

// 表单请求体的体积上限，超过则直接拒绝
const MAX_FORM_BODY_BYTES: usize = 1024 * 1024;

const FORM_TOKEN_HEADER: &str = "x-form-token";
const FORM_TOKEN_FIELD: &str = "formToken";

/// 公开表单提交的一次性令牌校验
///
/// GET 请求直接放行；其余请求必须携带有效令牌，校验通过后令牌立即作废。
/// 无论哪种校验失败，给客户端的响应都是同一个 403，具体原因只写进日志。
pub async fn require_form_token(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    if req.method() == Method::GET {
        return Ok(next.run(req).await);
    }

    let (req, token) = extract_form_token(req).await?;

    match state.form_tokens.consume(token.as_deref()).await {
        Ok(()) => Ok(next.run(req).await),
        Err(kind) => {
            tracing::warn!(
                "Form token rejected ({}) - {} {}",
                kind.as_str(),
                req.method(),
                req.uri().path()
            );
            Ok((
                StatusCode::FORBIDDEN,
                error_to_api_response::<()>(
                    error_codes::FORM_TOKEN_REJECTED,
                    "表单令牌缺失或已失效，请刷新页面后重新提交".to_string(),
                ),
            )
                .into_response())
        }
    }
}

/// 先查请求体中的 formToken 字段，再查 x-form-token 请求头
async fn extract_form_token(
    req: Request<Body>,
) -> Result<(Request<Body>, Option<String>), StatusCode> {
    let header_token = req
        .headers()
        .get(FORM_TOKEN_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(|s| s.trim().to_string());

    let (parts, body) = req.into_parts();
    let bytes = to_bytes(body, MAX_FORM_BODY_BYTES)
        .await
        .map_err(|_| StatusCode::PAYLOAD_TOO_LARGE)?;

    // 非JSON请求体解析不出字段，走请求头兜底
    let body_token = serde_json::from_slice::<serde_json::Value>(&bytes)
        .ok()
        .and_then(|json| json.get(FORM_TOKEN_FIELD)?.as_str().map(str::to_string));

    // 重置body以便后续handler继续读取
    let req = Request::from_parts(parts, Body::from(bytes));

    Ok((req, body_token.or(header_token)))
}
