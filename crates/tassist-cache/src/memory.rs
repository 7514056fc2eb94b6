use moka::future::Cache;
use std::time::Duration;
use tracing::warn;

use crate::error::CacheError;

/// TTL-bounded memo of successful tool payloads, backed by moka.
///
/// Values are stored as JSON strings. Entries expire after the configured
/// TTL and moka evicts under capacity pressure; both count as misses.
pub struct ToolCache {
    inner: Cache<String, String>,
}

impl ToolCache {
    pub fn new(max_capacity: u64, ttl: Duration) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(max_capacity)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Look up a payload. A stored value that no longer decodes is dropped
    /// and reported as a miss rather than an error.
    pub async fn get(&self, key: &str) -> Option<serde_json::Value> {
        let json = self.inner.get(key).await?;
        match decode(key, &json) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(error = %e, "Dropping corrupt cache entry");
                self.inner.invalidate(key).await;
                None
            }
        }
    }

    /// Store a successful payload. Callers only insert status = ok results.
    pub async fn insert(&self, key: String, payload: &serde_json::Value) {
        let json = payload.to_string();
        self.inner.insert(key, json).await;
    }

    pub async fn invalidate(&self, key: &str) {
        self.inner.invalidate(key).await;
    }

    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }

    #[doc(hidden)]
    pub async fn insert_raw(&self, key: String, json: String) {
        self.inner.insert(key, json).await;
    }
}

fn decode(key: &str, json: &str) -> Result<serde_json::Value, CacheError> {
    serde_json::from_str(json).map_err(|source| CacheError::Corrupt {
        key: key.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn insert_and_get() {
        let cache = ToolCache::new(100, Duration::from_secs(60));
        cache
            .insert("check_market_news:{}".to_string(), &json!({"stories_found": 3}))
            .await;

        let result = cache.get("check_market_news:{}").await;
        assert_eq!(result, Some(json!({"stories_found": 3})));
    }

    #[tokio::test]
    async fn get_missing() {
        let cache = ToolCache::new(100, Duration::from_secs(60));
        assert!(cache.get("nonexistent").await.is_none());
    }

    #[tokio::test]
    async fn ttl_expiration() {
        let cache = ToolCache::new(100, Duration::from_millis(50));
        cache.insert("k".to_string(), &json!({"v": 1})).await;

        assert!(cache.get("k").await.is_some());

        tokio::time::sleep(Duration::from_millis(100)).await;

        assert!(cache.get("k").await.is_none());
    }

    #[tokio::test]
    async fn invalidate() {
        let cache = ToolCache::new(100, Duration::from_secs(60));
        cache.insert("k".to_string(), &json!({"v": 1})).await;
        cache.invalidate("k").await;
        assert!(cache.get("k").await.is_none());
    }

    #[tokio::test]
    async fn corrupt_entry_is_a_miss_and_evicted() {
        let cache = ToolCache::new(100, Duration::from_secs(60));
        cache
            .insert_raw("bad".to_string(), "{not valid json".to_string())
            .await;

        assert!(cache.get("bad").await.is_none());
        // The corrupt entry was invalidated, not left behind.
        assert!(cache.inner.get("bad").await.is_none());
    }

    #[test]
    fn decode_failure_names_the_key() {
        let err = decode("check_market_news:{}", "{not valid json").unwrap_err();
        assert!(matches!(&err, CacheError::Corrupt { key, .. } if key == "check_market_news:{}"));
        assert!(err.to_string().contains("check_market_news:{}"));
    }
}
