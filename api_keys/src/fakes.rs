//! In-memory stand-ins for the secret store and the cache.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use common::{
    env_config::{AzureCredential, Config},
    error::{AppError, Res},
};
use stores::{CacheStore, SecretStore};

#[derive(Default)]
pub(crate) struct RecordingSecrets {
    calls: Mutex<Vec<(String, String)>>,
    values: Mutex<HashMap<String, String>>,
}

impl RecordingSecrets {
    pub(crate) fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn stored(&self, name: &str) -> Option<String> {
        self.values.lock().unwrap().get(name).cloned()
    }

    pub(crate) fn len(&self) -> usize {
        self.values.lock().unwrap().len()
    }
}

#[async_trait]
impl SecretStore for RecordingSecrets {
    async fn set_secret(&self, name: &str, value: &str) -> Res<()> {
        self.calls
            .lock()
            .unwrap()
            .push((name.to_string(), value.to_string()));
        self.values
            .lock()
            .unwrap()
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn location(&self) -> &str {
        "memory://secrets"
    }
}

pub(crate) struct FailingSecrets;

#[async_trait]
impl SecretStore for FailingSecrets {
    async fn set_secret(&self, _name: &str, _value: &str) -> Res<()> {
        Err(AppError::KeyVault("403 Forbidden: Caller is not authorized".to_string()))
    }

    fn location(&self) -> &str {
        "memory://failing"
    }
}

#[derive(Default)]
pub(crate) struct RecordingCache {
    sets: Mutex<Vec<(String, String)>>,
    gets: Mutex<usize>,
    values: Mutex<HashMap<String, String>>,
}

impl RecordingCache {
    pub(crate) fn with_entry(key: &str, value: &str) -> Self {
        let cache = Self::default();
        cache
            .values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        cache
    }

    pub(crate) fn sets(&self) -> Vec<(String, String)> {
        self.sets.lock().unwrap().clone()
    }

    pub(crate) fn gets(&self) -> usize {
        *self.gets.lock().unwrap()
    }

    pub(crate) fn stored(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }
}

#[async_trait]
impl CacheStore for RecordingCache {
    async fn set(&self, key: &str, value: &str) -> Res<()> {
        self.sets
            .lock()
            .unwrap()
            .push((key.to_string(), value.to_string()));
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn get(&self, key: &str) -> Res<Option<String>> {
        *self.gets.lock().unwrap() += 1;
        Ok(self.values.lock().unwrap().get(key).cloned())
    }
}

pub(crate) struct FailingCache;

#[async_trait]
impl CacheStore for FailingCache {
    async fn set(&self, _key: &str, _value: &str) -> Res<()> {
        Err(refused())
    }

    async fn get(&self, _key: &str) -> Res<Option<String>> {
        Err(refused())
    }
}

fn refused() -> AppError {
    AppError::from(redis::RedisError::from((
        redis::ErrorKind::IoError,
        "connection refused",
    )))
}

pub(crate) fn config(save_to_cache: bool) -> Arc<Config> {
    Arc::new(Config {
        environment: "development".to_string(),
        key_vault_uri: "https://test-vault.vault.azure.net/".to_string(),
        redis_url: "redis://127.0.0.1:6379".to_string(),
        save_to_cache,
        azure_credential: AzureCredential {
            tenant_id: "tenant".to_string(),
            client_id: "client".to_string(),
            client_secret: "secret".to_string(),
            authority_host: "https://login.microsoftonline.com".to_string(),
        },
        key_vault_api_version: "7.4".to_string(),
        server_host: "127.0.0.1".to_string(),
        server_port: 8080,
        num_workers: 1,
        cors_allowed_origin: "http://localhost:3000".to_string(),
        console_logging_enabled: false,
        log_level: "debug".to_string(),
        log_file: "keymgmt.log".to_string(),
    })
}

/// Initialises the routes of this crate over the given config and backends.
macro_rules! test_app {
    ($config:expr, $secrets:expr, $cache:expr) => {{
        let secrets: std::sync::Arc<dyn stores::SecretStore> = $secrets;
        let cache: std::sync::Arc<dyn stores::CacheStore> = $cache;
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($config))
                .app_data(actix_web::web::Data::from(secrets))
                .app_data(actix_web::web::Data::from(cache))
                .service(crate::mount_keys()),
        )
        .await
    }};
}
pub(crate) use test_app;
