use common::error::{AppError, Res};
use stores::{CacheStore, SecretStore};

use crate::{dtos::key::KeyValModel, service::payload::parse_json_object};

/// Parses and validates a key generation payload.
///
/// The body must be a JSON object with non-empty `userName` and `apiKey`.
/// The raw body is never echoed back.
pub(crate) fn parse_key_gen_request(body: &[u8]) -> Res<KeyValModel> {
    let kv: Option<KeyValModel> = parse_json_object(body)?;

    let kv = kv.ok_or_else(|| AppError::InvalidPayload("body is null".to_string()))?;

    if kv.user_name.is_empty() {
        return Err(AppError::InvalidPayload(
            "'userName' is missing or empty".to_string(),
        ));
    }
    if kv.api_key.is_empty() {
        return Err(AppError::InvalidPayload(
            "'apiKey' is missing or empty".to_string(),
        ));
    }

    Ok(kv)
}

/// Stores the API key as a secret named after the user and, when
/// `save_to_cache` is set, mirrors the pair into the cache keyed by the API key.
///
/// Backend failures are returned as-is; nothing here catches them, so a
/// failed secret write means the cache is never touched.
///
/// # Arguments
///
/// * `secrets` - The secret store receiving `userName -> apiKey`.
/// * `cache` - The cache receiving `apiKey -> userName`.
/// * `save_to_cache` - Whether the cache write happens at all.
/// * `kv` - The validated request.
///
/// # Returns
///
/// The request itself, to be echoed to the caller.
pub(crate) async fn generate_key(
    secrets: &dyn SecretStore,
    cache: &dyn CacheStore,
    save_to_cache: bool,
    kv: KeyValModel,
) -> Res<KeyValModel> {
    log::info!("configs kv.name = {}", kv.user_name);

    secrets.set_secret(&kv.user_name, &kv.api_key).await?;

    if save_to_cache {
        cache.set(&kv.api_key, &kv.user_name).await?;
    }

    Ok(kv)
}
