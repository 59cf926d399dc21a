use serde::{Deserialize, Serialize};

/// A user name / API key pair.
///
/// Also the shape of a successful cache lookup, where `api_key` echoes the
/// queried cache key and `user_name` carries the cached value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValModel {
    #[serde(rename = "userName", alias = "UserName", default)]
    pub user_name: String,
    #[serde(rename = "apiKey", alias = "APIKey", alias = "ApiKey", default)]
    pub api_key: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CacheValModel {
    #[serde(rename = "cacheKey", alias = "CacheKey", default)]
    pub cache_key: String,
}

#[derive(Debug, Deserialize)]
pub struct CacheKeyQuery {
    #[serde(rename = "cacheKey")]
    pub cache_key: Option<String>,
}
