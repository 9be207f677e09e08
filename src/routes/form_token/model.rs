use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct IssueFormTokenResponse {
    #[serde(rename = "formToken")]
    pub form_token: String,
    #[serde(rename = "expiresIn")]
    pub expires_in: u64,
}
