//! Fixed-window rate limiting over a shared [`CacheStore`].

use std::sync::Arc;
use std::time::Duration;

use ticketing_core::rate_limit::counter_key;

use crate::store::{CacheError, CacheStore};

/// Outcome of counting one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitDecision {
    Allowed { remaining: u64 },
    Exceeded,
}

/// Allows `limit` requests per fingerprint in each `window`.
#[derive(Clone)]
pub struct FixedWindowLimiter {
    store: Arc<dyn CacheStore>,
    limit: u64,
    window: Duration,
}

impl FixedWindowLimiter {
    pub fn new(store: Arc<dyn CacheStore>, limit: u64, window: Duration) -> Self {
        Self {
            store,
            limit,
            window,
        }
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Count one request for `fingerprint` and decide whether it may proceed.
    pub async fn check(&self, fingerprint: &str) -> Result<LimitDecision, CacheError> {
        let count = self
            .store
            .incr_window(&counter_key(fingerprint), self.window)
            .await?;
        if count > self.limit {
            Ok(LimitDecision::Exceeded)
        } else {
            Ok(LimitDecision::Allowed {
                remaining: self.limit - count,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn limiter(limit: u64) -> FixedWindowLimiter {
        FixedWindowLimiter::new(Arc::new(MemoryStore::new()), limit, Duration::from_secs(60))
    }

    #[tokio::test]
    async fn allows_up_to_limit_then_rejects() {
        let limiter = limiter(2);
        assert_eq!(
            limiter.check("a").await.unwrap(),
            LimitDecision::Allowed { remaining: 1 }
        );
        assert_eq!(
            limiter.check("a").await.unwrap(),
            LimitDecision::Allowed { remaining: 0 }
        );
        assert_eq!(limiter.check("a").await.unwrap(), LimitDecision::Exceeded);
        assert_eq!(limiter.check("a").await.unwrap(), LimitDecision::Exceeded);
    }

    #[tokio::test]
    async fn fingerprints_do_not_share_quota() {
        let limiter = limiter(1);
        assert!(matches!(limiter.check("a").await.unwrap(), LimitDecision::Allowed { .. }));
        assert_eq!(limiter.check("a").await.unwrap(), LimitDecision::Exceeded);
        assert!(matches!(limiter.check("b").await.unwrap(), LimitDecision::Allowed { .. }));
    }

    #[tokio::test]
    async fn counters_use_prefixed_keys() {
        let store = Arc::new(MemoryStore::new());
        let limiter = FixedWindowLimiter::new(store.clone(), 5, Duration::from_secs(60));
        limiter.check("abc").await.unwrap();
        assert_eq!(store.get("rl:abc").await.unwrap().as_deref(), Some("1"));
    }
}
