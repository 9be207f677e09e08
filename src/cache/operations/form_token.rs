use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::Mutex;

use crate::cache::models::form_token::CachedFormToken;
use crate::utils::generate_form_token;

/// 表单令牌校验失败的种类
///
/// 对客户端统一按拒绝处理，具体种类只用于日志。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormTokenError {
    Missing,
    NotFound,
    AlreadyUsed,
    Expired,
}

impl FormTokenError {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormTokenError::Missing => "missing",
            FormTokenError::NotFound => "not_found",
            FormTokenError::AlreadyUsed => "already_used",
            FormTokenError::Expired => "expired",
        }
    }
}

/// 一次性表单令牌缓存操作
///
/// 令牌保存在进程内的内存表中，进程重启后全部失效。
pub struct FormTokenStore {
    expiration_secs: i64,
    tokens: Mutex<HashMap<String, CachedFormToken>>,
}

impl FormTokenStore {
    pub fn new(expiration: Duration) -> Self {
        Self {
            expiration_secs: expiration.as_secs() as i64,
            tokens: Mutex::new(HashMap::new()),
        }
    }

    /// 签发新令牌，返回令牌字符串和有效期（秒）
    pub async fn issue(&self) -> (String, u64) {
        let token = generate_form_token();
        let record = CachedFormToken {
            token: token.clone(),
            issued_at: chrono::Utc::now().timestamp(),
            used: false,
        };

        let mut tokens = self.tokens.lock().await;
        tokens.insert(token.clone(), record);

        (token, self.expiration_secs as u64)
    }

    /// 校验并消费令牌
    ///
    /// 检查和标记持同一把锁完成，同一令牌并发提交时只有一次能成功。
    pub async fn consume(&self, token: Option<&str>) -> Result<(), FormTokenError> {
        let token = match token {
            Some(t) if !t.is_empty() => t,
            _ => return Err(FormTokenError::Missing),
        };

        let mut tokens = self.tokens.lock().await;
        let now = chrono::Utc::now().timestamp();

        let expired = match tokens.get_mut(token) {
            None => return Err(FormTokenError::NotFound),
            Some(record) => {
                if record.used {
                    return Err(FormTokenError::AlreadyUsed);
                }
                if now - record.issued_at > self.expiration_secs {
                    true
                } else {
                    record.used = true;
                    false
                }
            }
        };

        if expired {
            // 过期的令牌顺手移除，不等下一次清理
            tokens.remove(token);
            return Err(FormTokenError::Expired);
        }

        Ok(())
    }

    /// 清理所有超过有效期的令牌，无论是否已被使用，返回清理数量
    pub async fn sweep_expired(&self) -> usize {
        let mut tokens = self.tokens.lock().await;
        let now = chrono::Utc::now().timestamp();

        let before = tokens.len();
        tokens.retain(|_, record| now - record.issued_at <= self.expiration_secs);
        before - tokens.len()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn store_with_expiration(secs: u64) -> FormTokenStore {
        FormTokenStore::new(Duration::from_secs(secs))
    }

    async fn backdate(store: &FormTokenStore, token: &str, secs: i64) {
        let mut tokens = store.tokens.lock().await;
        tokens.get_mut(token).unwrap().issued_at -= secs;
    }

    #[tokio::test]
    async fn issued_token_is_consumed_exactly_once() {
        let store = store_with_expiration(3600);
        let (token, expires_in) = store.issue().await;

        assert_eq!(expires_in, 3600);
        assert_eq!(store.consume(Some(token.as_str())).await, Ok(()));
        assert_eq!(
            store.consume(Some(token.as_str())).await,
            Err(FormTokenError::AlreadyUsed)
        );
    }

    #[tokio::test]
    async fn concurrent_consume_yields_a_single_success() {
        let store = Arc::new(store_with_expiration(3600));
        let (token, _) = store.issue().await;

        let mut handles = Vec::new();
        for _ in 0..2 {
            let store = store.clone();
            let token = token.clone();
            handles.push(tokio::spawn(async move {
                store.consume(Some(token.as_str())).await
            }));
        }

        let mut successes = 0;
        let mut already_used = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(()) => successes += 1,
                Err(FormTokenError::AlreadyUsed) => already_used += 1,
                Err(other) => panic!("unexpected rejection: {:?}", other),
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(already_used, 1);
    }

    #[tokio::test]
    async fn expired_token_is_rejected_and_evicted() {
        let store = store_with_expiration(3600);
        let (token, _) = store.issue().await;
        backdate(&store, &token, 3601).await;

        assert_eq!(
            store.consume(Some(token.as_str())).await,
            Err(FormTokenError::Expired)
        );
        // 校验时已经移除，再次提交按不存在处理
        assert_eq!(
            store.consume(Some(token.as_str())).await,
            Err(FormTokenError::NotFound)
        );
    }

    #[tokio::test]
    async fn unknown_token_is_rejected() {
        let store = store_with_expiration(3600);

        assert_eq!(
            store.consume(Some("0123456789abcdef0123456789abcdef")).await,
            Err(FormTokenError::NotFound)
        );
    }

    #[tokio::test]
    async fn missing_or_empty_token_is_rejected() {
        let store = store_with_expiration(3600);

        assert_eq!(store.consume(None).await, Err(FormTokenError::Missing));
        assert_eq!(store.consume(Some("")).await, Err(FormTokenError::Missing));
    }

    #[tokio::test]
    async fn sweep_evicts_expired_records_regardless_of_use() {
        let store = store_with_expiration(3600);
        let (used, _) = store.issue().await;
        let (stale, _) = store.issue().await;
        let (fresh, _) = store.issue().await;

        store.consume(Some(used.as_str())).await.unwrap();
        backdate(&store, &used, 7200).await;
        backdate(&store, &stale, 7200).await;

        assert_eq!(store.sweep_expired().await, 2);

        let tokens = store.tokens.lock().await;
        assert_eq!(tokens.len(), 1);
        assert!(tokens.contains_key(&fresh));
    }

    #[tokio::test]
    async fn sweep_keeps_records_inside_the_window() {
        let store = store_with_expiration(3600);
        let (token, _) = store.issue().await;

        assert_eq!(store.sweep_expired().await, 0);
        assert_eq!(store.consume(Some(token.as_str())).await, Ok(()));
    }
}
