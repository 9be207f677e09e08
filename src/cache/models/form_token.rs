/// 一次性表单令牌缓存数据模型
#[derive(Debug, Clone)]
pub struct CachedFormToken {
    pub token: String,
    pub issued_at: i64, // Unix timestamp
    pub used: bool,
}
