use common::{
    error::{AppError, Res},
    redact::mask_key,
};
use stores::CacheStore;

use crate::dtos::key::KeyValModel;

/// Returns the key if it is present and non-empty, otherwise a `MissingKey`
/// error carrying `missing_message`.
pub(crate) fn require_key(cache_key: Option<String>, missing_message: &str) -> Res<String> {
    cache_key
        .filter(|key| !key.is_empty())
        .ok_or_else(|| AppError::MissingKey(missing_message.to_string()))
}

/// Looks up `cache_key` in the cache.
///
/// A cache fault is reported as a bad request carrying the fault text,
/// unlike key generation which lets backend faults through as server errors.
/// An empty cached value counts as a miss.
pub(crate) async fn lookup(cache: &dyn CacheStore, cache_key: &str) -> Res<KeyValModel> {
    log::info!("configs kv.cacheKey = {}", mask_key(cache_key));

    let value = cache.get(cache_key).await.map_err(|e| {
        log::warn!("Cache lookup for '{}' failed: {}", mask_key(cache_key), e);
        AppError::BadRequest(format!(
            "Error retrieving cache key '{}': {}",
            cache_key, e
        ))
    })?;

    match value.filter(|v| !v.is_empty()) {
        Some(user_name) => Ok(KeyValModel {
            api_key: cache_key.to_string(),
            user_name,
        }),
        None => Err(AppError::NotFound(format!(
            "Cache key '{}' not found.",
            cache_key
        ))),
    }
}
