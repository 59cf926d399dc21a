use std::sync::Arc;

use common::{
    env_config::Config,
    error::{AppError, Res},
};

pub mod cache;
pub mod keyvault;
pub mod redis_cache;
pub mod secret;

pub use cache::CacheStore;
pub use keyvault::KeyVaultStore;
pub use redis_cache::RedisCache;
pub use secret::SecretStore;

/// Builds the vault client from configuration.
pub fn setup_secret_store(config: &Config) -> Res<Arc<dyn SecretStore>> {
    let store = KeyVaultStore::new(
        &config.key_vault_uri,
        &config.key_vault_api_version,
        config.azure_credential.clone(),
    )?;
    Ok(Arc::new(store))
}

/// Builds the pooled Redis cache from configuration.
///
/// Connections are opened lazily, so an unreachable server surfaces on the
/// first cache call rather than here.
pub fn setup_cache(config: &Config) -> Res<Arc<dyn CacheStore>> {
    let cfg = deadpool_redis::Config::from_url(&config.redis_url);
    let pool = cfg
        .create_pool(Some(deadpool_redis::Runtime::Tokio1))
        .map_err(|e| AppError::Internal(format!("Failed to create pool of Redis connections: {}", e)))?;
    Ok(Arc::new(RedisCache::new(pool)))
}
