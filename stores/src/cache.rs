use async_trait::async_trait;
use common::error::Res;

/// Low-latency string key/value cache.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn set(&self, key: &str, value: &str) -> Res<()>;

    /// Returns `None` when the key is absent.
    async fn get(&self, key: &str) -> Res<Option<String>>;
}
