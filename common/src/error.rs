use actix_web::HttpResponse;
use thiserror::Error;

pub type Res<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    // === CONVERSION ERRORS ===
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Redis pool error: {0}")]
    RedisPool(#[from] deadpool_redis::PoolError),

    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    // === BACKEND ERRORS ===
    #[error("Key Vault error: {0}")]
    KeyVault(String),

    // === APPLICATION ERRORS ===
    #[error("Invalid request payload: {0}")]
    InvalidPayload(String),

    #[error("{0}")]
    MissingKey(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    /// True for failures raised by the secret store or the cache.
    pub fn is_backend_fault(&self) -> bool {
        matches!(
            self,
            AppError::Redis(_) | AppError::RedisPool(_) | AppError::Reqwest(_) | AppError::KeyVault(_)
        )
    }

    pub fn to_http_response(&self) -> HttpResponse {
        let is_dev = cfg!(debug_assertions);

        let to_internal_json = |err_msg: &str| {
            if is_dev {
                serde_json::json!({ "error": err_msg })
            } else {
                serde_json::json!({ "error": "Internal server error" })
            }
        };

        match self {
            // === CONVERSION ERRORS ===
            AppError::Redis(error) => {
                log::error!("Redis error: {}", error);
                HttpResponse::InternalServerError().json(to_internal_json(&self.to_string()))
            }
            AppError::RedisPool(error) => {
                log::error!("Redis pool error: {}", error);
                HttpResponse::InternalServerError().json(to_internal_json(&self.to_string()))
            }
            AppError::Reqwest(error) => {
                log::error!("Reqwest error: {}", error);
                HttpResponse::InternalServerError().json(to_internal_json(&self.to_string()))
            }

            // === BACKEND ERRORS ===
            AppError::KeyVault(error) => {
                log::error!("Key Vault error: {}", error);
                HttpResponse::InternalServerError().json(to_internal_json(&self.to_string()))
            }

            // === APPLICATION ERRORS ===
            AppError::InvalidPayload(_) | AppError::MissingKey(_) | AppError::BadRequest(_) => {
                HttpResponse::BadRequest().json(serde_json::json!({ "error": self.to_string() }))
            }
            AppError::NotFound(_) => {
                HttpResponse::NotFound().json(serde_json::json!({ "error": self.to_string() }))
            }

            AppError::Internal(error) => {
                log::error!("Internal error: {}", error);
                HttpResponse::InternalServerError().json(to_internal_json(error))
            }
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        self.to_http_response()
    }
}
