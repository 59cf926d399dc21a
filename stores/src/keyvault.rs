//! Azure Key Vault secrets client.
//!
//! Talks to the vault REST API directly: an access token is obtained with the
//! client-credentials grant against the Microsoft identity platform and
//! reused until shortly before it expires, then each secret write is a
//! `PUT {vault}/secrets/{name}?api-version=...`.
//!
//! Secret values are never logged and never included in error messages.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use common::{
    env_config::AzureCredential,
    error::{AppError, Res},
};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use url::Url;

use crate::secret::SecretStore;

const VAULT_SCOPE: &str = "https://vault.azure.net/.default";

/// Tokens closer than this to expiry are refreshed before use.
const TOKEN_REFRESH_MARGIN_SECS: i64 = 60;

pub struct KeyVaultStore {
    http: reqwest::Client,
    vault_uri: Url,
    api_version: String,
    credential: AzureCredential,
    token: RwLock<Option<AccessToken>>,
}

struct AccessToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl AccessToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.expires_at - Duration::seconds(TOKEN_REFRESH_MARGIN_SECS) > now
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Serialize)]
struct SetSecretBody<'a> {
    value: &'a str,
}

impl KeyVaultStore {
    /// Creates a client for the vault at `vault_uri`.
    ///
    /// No network call is made until the first secret is written.
    pub fn new(vault_uri: &str, api_version: &str, credential: AzureCredential) -> Res<Self> {
        let vault_uri = Url::parse(vault_uri)
            .map_err(|e| AppError::Internal(format!("Invalid Key Vault URI '{}': {}", vault_uri, e)))?;
        if vault_uri.cannot_be_a_base() {
            return Err(AppError::Internal(format!(
                "Invalid Key Vault URI '{}'",
                vault_uri
            )));
        }

        Ok(Self {
            http: reqwest::Client::new(),
            vault_uri,
            api_version: api_version.to_string(),
            credential,
            token: RwLock::new(None),
        })
    }

    fn secret_url(&self, name: &str) -> Res<Url> {
        let mut url = self.vault_uri.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::Internal(format!("Invalid Key Vault URI '{}'", self.vault_uri)))?
            .pop_if_empty()
            .push("secrets")
            .push(name);
        url.set_query(None);
        url.query_pairs_mut()
            .append_pair("api-version", &self.api_version);
        Ok(url)
    }

    fn token_url(&self) -> String {
        format!(
            "{}/{}/oauth2/v2.0/token",
            self.credential.authority_host.trim_end_matches('/'),
            self.credential.tenant_id
        )
    }

    async fn access_token(&self) -> Res<String> {
        {
            let cached = self.token.read().await;
            if let Some(token) = cached.as_ref().filter(|t| t.is_fresh(Utc::now())) {
                return Ok(token.value.clone());
            }
        }

        let token = self.request_token().await?;
        let value = token.value.clone();
        *self.token.write().await = Some(token);
        Ok(value)
    }

    async fn request_token(&self) -> Res<AccessToken> {
        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", self.credential.client_id.as_str()),
            ("client_secret", self.credential.client_secret.as_str()),
            ("scope", VAULT_SCOPE),
        ];

        let response = self.http.post(self.token_url()).form(&params).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::KeyVault(format!(
                "token request returned {}: {}",
                status,
                error_message(&body)
            )));
        }

        let token: TokenResponse = response.json().await?;
        log::debug!("Obtained Key Vault access token valid for {}s", token.expires_in);

        Ok(AccessToken {
            value: token.access_token,
            expires_at: Utc::now() + Duration::seconds(token.expires_in),
        })
    }
}

#[async_trait]
impl SecretStore for KeyVaultStore {
    async fn set_secret(&self, name: &str, value: &str) -> Res<()> {
        let token = self.access_token().await?;
        let url = self.secret_url(name)?;

        let response = self
            .http
            .put(url)
            .bearer_auth(token)
            .json(&SetSecretBody { value })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::KeyVault(format!(
                "setting secret '{}' returned {}: {}",
                name,
                status,
                error_message(&body)
            )));
        }

        log::info!("Secret '{}' was set in Key Vault '{}'.", name, self.location());
        Ok(())
    }

    fn location(&self) -> &str {
        self.vault_uri.as_str()
    }
}

/// Pulls a readable message out of a vault or identity-platform error body.
fn error_message(body: &str) -> String {
    let json: serde_json::Value = match serde_json::from_str(body) {
        Ok(json) => json,
        Err(_) if body.trim().is_empty() => return "no details".to_string(),
        Err(_) => return body.trim().to_string(),
    };

    json["error"]["message"]
        .as_str()
        .or_else(|| json["error_description"].as_str())
        .or_else(|| json["error"].as_str())
        .map(str::to_string)
        .unwrap_or_else(|| body.trim().to_string())
}
