use async_trait::async_trait;
use common::{error::Res, redact::mask_key};
use redis::AsyncCommands;

use crate::cache::CacheStore;

/// `CacheStore` backed by a pool of Redis connections.
pub struct RedisCache {
    pool: deadpool_redis::Pool,
}

impl RedisCache {
    pub fn new(pool: deadpool_redis::Pool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CacheStore for RedisCache {
    async fn set(&self, key: &str, value: &str) -> Res<()> {
        let mut conn = self.pool.get().await?;
        let _: () = conn.set(key, value).await?;
        log::info!("Key '{}' was set in Redis.", mask_key(key));
        Ok(())
    }

    async fn get(&self, key: &str) -> Res<Option<String>> {
        let mut conn = self.pool.get().await?;
        let value: Option<String> = conn.get(key).await?;
        log::info!("Key '{}' was retrieved from Redis.", mask_key(key));
        Ok(value)
    }
}
