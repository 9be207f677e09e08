use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use crate::common::ApiResponse;

/// 生成高熵的一次性表单令牌
pub fn generate_form_token() -> String {
    Uuid::new_v4().simple().to_string()
}

pub fn success_to_api_response<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse::success(data))
}

pub fn error_to_api_response<T: Serialize>(code: i32, message: String) -> Json<ApiResponse<T>> {
    Json(ApiResponse::error(code, message))
}

pub mod error_codes {
    pub const VALIDATION_ERROR: i32 = 1000;
    pub const FORM_TOKEN_REJECTED: i32 = 1006;
    pub const INTERNAL_ERROR: i32 = 5000;
}
