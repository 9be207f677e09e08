use serde::Serialize;

/// 统一的API响应结构
///
/// 成功时业务字段直接平铺在响应顶层，失败时附带错误码和提示信息。
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            code: None,
            message: None,
            data: Some(data),
        }
    }

    pub fn error(code: i32, message: String) -> Self {
        Self {
            success: false,
            code: Some(code),
            message: Some(message),
            data: None,
        }
    }
}
