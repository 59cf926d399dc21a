use std::sync::Arc;

use actix_web::{Responder, post, web};
use common::{env_config::Config, error::Res, http::Success};
use stores::{CacheStore, SecretStore};

use crate::service;

/// Stores a user's API key in the secret store and optionally mirrors it into the cache.
///
/// # Arguments
///
/// * `config` - The application configuration (cache mirroring switch).
/// * `secrets` - The secret store.
/// * `cache` - The cache.
/// * `body` - Raw JSON body `{ "userName": ..., "apiKey": ... }`.
///
/// # Returns
///
/// A `Result` containing a `Success` response echoing the request or an `AppError`.
#[post("/KeyGenRequest")]
pub async fn post_key_gen_request(
    config: web::Data<Arc<Config>>,
    secrets: web::Data<dyn SecretStore>,
    cache: web::Data<dyn CacheStore>,
    body: web::Bytes,
) -> Res<impl Responder> {
    let kv = service::key::parse_key_gen_request(&body)?;
    let kv =
        service::key::generate_key(secrets.get_ref(), cache.get_ref(), config.save_to_cache, kv)
            .await?;
    Success::ok(kv)
}
