use actix_web::{Responder, get, post, web};
use common::{error::Res, http::Success};
use stores::CacheStore;

use crate::{
    dtos::key::{CacheKeyQuery, CacheValModel},
    service,
};

/// Looks up a cached user name by the `cacheKey` query parameter.
#[get("/CacheValueRequest")]
pub async fn get_cache_value(
    cache: web::Data<dyn CacheStore>,
    query: web::Query<CacheKeyQuery>,
) -> Res<impl Responder> {
    let cache_key = service::cache::require_key(
        query.into_inner().cache_key,
        "Missing or empty 'cacheKey' query parameter.",
    )?;
    let kv = service::cache::lookup(cache.get_ref(), &cache_key).await?;
    Success::ok(kv)
}

/// Same lookup as [`get_cache_value`], with the key sent as `{ "cacheKey": ... }`.
#[post("/CacheValueRequest")]
pub async fn post_cache_value(
    cache: web::Data<dyn CacheStore>,
    body: web::Bytes,
) -> Res<impl Responder> {
    let request: Option<CacheValModel> = service::payload::parse_json_object(&body)?;
    let cache_key = service::cache::require_key(
        request.map(|r| r.cache_key),
        "Missing or empty 'cacheKey' in request body.",
    )?;
    let kv = service::cache::lookup(cache.get_ref(), &cache_key).await?;
    Success::ok(kv)
}
