use std::{env, sync::Arc};

#[derive(Clone, Debug)]
/// Configuration struct for the server.
///
/// This struct holds all the necessary configuration parameters
/// required to initialize and run the server: the locations of the
/// secret store and the cache, the identity used against the vault,
/// server host and port, number of worker threads, CORS settings,
/// logging preferences and the cache mirroring switch.
pub struct Config {
    // environment
    pub environment: String, // development or production
    /// Base URL of the Key Vault that receives the secrets.
    pub key_vault_uri: String,
    /// The URL of Redis server to connect to.
    pub redis_url: String,
    /// Whether a generated key is also mirrored into the cache (apiKey -> userName).
    pub save_to_cache: bool,
    /// Identity used to obtain vault access tokens.
    pub azure_credential: AzureCredential,
    /// REST api-version sent to the vault.
    pub key_vault_api_version: String,
    /// The hostname or IP address the server will bind to.
    pub server_host: String,
    /// The port number the server will listen on.
    pub server_port: u16,
    /// The number of worker threads to spawn for handling requests.
    pub num_workers: usize,
    /// The allowed origin for CORS (Cross-Origin Resource Sharing).
    pub cors_allowed_origin: String,
    /// A boolean indicating whether console logging is enabled.
    pub console_logging_enabled: bool,
    /// Level filter handed to the log dispatcher.
    pub log_level: String,
    /// File the log dispatcher writes to next to stdout.
    pub log_file: String,
}

#[derive(Clone, Debug)]
/// Client-credentials identity for the Microsoft identity platform.
///
/// The token authority is `{authority_host}/{tenant_id}/oauth2/v2.0/token`.
pub struct AzureCredential {
    pub tenant_id: String,
    pub client_id: String,
    pub client_secret: String,
    pub authority_host: String,
}

impl AzureCredential {
    /// Creates a new `AzureCredential` from environment variables.
    ///
    /// Reads `AZURE_TENANT_ID`, `AZURE_CLIENT_ID` and `AZURE_CLIENT_SECRET`
    /// (all required) and `AZURE_AUTHORITY_HOST` (optional).
    ///
    /// # Panics
    ///
    /// This function will panic if one of the required variables is not set.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        AzureCredential {
            tenant_id: env::var("AZURE_TENANT_ID").expect("AZURE_TENANT_ID must be set"),
            client_id: env::var("AZURE_CLIENT_ID").expect("AZURE_CLIENT_ID must be set"),
            client_secret: env::var("AZURE_CLIENT_SECRET")
                .expect("AZURE_CLIENT_SECRET must be set"),
            authority_host: env::var("AZURE_AUTHORITY_HOST")
                .unwrap_or_else(|_| "https://login.microsoftonline.com".to_string()),
        }
    }
}

impl Config {
    /// Creates a new `Config` instance from environment variables.
    ///
    /// # Environment Variables
    ///
    /// Required:
    /// - `KEY_VAULT_URI` (or `KeyVaultUri`): base URL of the vault
    /// - `REDIS_URL` (or `RedisConn`): connection URL of the cache
    /// - `AZURE_TENANT_ID`, `AZURE_CLIENT_ID`, `AZURE_CLIENT_SECRET` (via `AzureCredential::from_env()`)
    ///
    /// Optional (with defaults):
    /// - `ENVIRONMENT`: "development" or "production" (default: "development")
    /// - `SAVE_TO_CACHE` (or `SaveToCache`): mirror generated keys into the cache (default: false)
    /// - `KEY_VAULT_API_VERSION`: vault REST api-version (default: "7.4")
    /// - `IP`: Server host (default: "127.0.0.1")
    /// - `PORT`: Server port (default: 8080)
    /// - `WORKERS`: Number of worker threads (default: 4)
    /// - `CORS_ALLOWED_ORIGIN`: Allowed CORS origin (default: "http://localhost:3000")
    /// - `ENABLE_CONSOLE_LOGGING`: Whether to enable console logging (default: true)
    /// - `LOG_LEVEL`: log level filter (default: "debug")
    /// - `LOG_FILE`: log file path (default: "keymgmt.log")
    ///
    /// # Panics
    ///
    /// This function will panic if required environment variables are missing or if
    /// `SAVE_TO_CACHE` holds something other than a boolean.
    pub fn from_env() -> Arc<Self> {
        dotenvy::dotenv().ok();

        let save_to_cache = parse_bool_flag(var_or_legacy("SAVE_TO_CACHE", "SaveToCache").as_deref())
            .expect("SAVE_TO_CACHE must be either true or false");

        Arc::new(Config {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            key_vault_uri: var_or_legacy("KEY_VAULT_URI", "KeyVaultUri")
                .expect("KEY_VAULT_URI must be set"),
            redis_url: var_or_legacy("REDIS_URL", "RedisConn").expect("REDIS_URL must be set"),
            save_to_cache,
            azure_credential: AzureCredential::from_env(),
            key_vault_api_version: env::var("KEY_VAULT_API_VERSION")
                .unwrap_or_else(|_| "7.4".to_string()),
            server_host: env::var("IP").unwrap_or_else(|_| "127.0.0.1".to_string()),
            server_port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            num_workers: env::var("WORKERS")
                .unwrap_or_else(|_| "4".to_string())
                .parse()
                .unwrap_or(4),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            console_logging_enabled: env::var("ENABLE_CONSOLE_LOGGING")
                .unwrap_or_else(|_| "true".to_string())
                .to_lowercase()
                == "true",
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "debug".to_string()),
            log_file: env::var("LOG_FILE").unwrap_or_else(|_| "keymgmt.log".to_string()),
        })
    }
}

/// Reads `name`, falling back to the app-setting spelling used by older deployments.
fn var_or_legacy(name: &str, legacy: &str) -> Option<String> {
    env::var(name).or_else(|_| env::var(legacy)).ok()
}

/// Parses a boolean switch the way app settings are converted.
///
/// `true`/`false` match in any case and surrounding whitespace is ignored.
/// An unset or blank value is `false`. Anything else is rejected.
pub fn parse_bool_flag(raw: Option<&str>) -> Result<bool, String> {
    let Some(raw) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(false);
    };

    if raw.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(format!("'{}' is not a valid boolean", raw))
    }
}
