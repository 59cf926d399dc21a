use actix_web::web;
use common::error::AppError;

pub mod routes {
    pub mod cache;
    pub mod key;
}

mod service {
    pub(crate) mod cache;
    pub(crate) mod key;
    pub(crate) mod payload;
}
mod dtos {
    pub(crate) mod key;
}

#[cfg(test)]
mod fakes;

pub fn mount_keys() -> actix_web::Scope {
    web::scope("/api")
        .app_data(web::QueryConfig::default().error_handler(|err, _req| {
            AppError::InvalidPayload(err.to_string()).into()
        }))
        .service(routes::key::post_key_gen_request)
        .service(routes::cache::get_cache_value)
        .service(routes::cache::post_cache_value)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{http::StatusCode, test};
    use serde_json::{Value, json};

    use crate::fakes::{RecordingCache, RecordingSecrets, config, test_app};

    #[actix_web::test]
    async fn generated_key_can_be_looked_up() {
        let secrets = Arc::new(RecordingSecrets::default());
        let cache = Arc::new(RecordingCache::default());
        let app = test_app!(config(true), secrets.clone(), cache.clone());

        let req = test::TestRequest::post()
            .uri("/api/KeyGenRequest")
            .set_json(json!({ "userName": "alice", "apiKey": "xyz123" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "userName": "alice", "apiKey": "xyz123" }));

        assert_eq!(secrets.calls(), vec![("alice".to_string(), "xyz123".to_string())]);
        assert_eq!(cache.sets(), vec![("xyz123".to_string(), "alice".to_string())]);

        let req = test::TestRequest::get()
            .uri("/api/CacheValueRequest?cacheKey=xyz123")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "apiKey": "xyz123", "userName": "alice" }));
    }

    #[actix_web::test]
    async fn regenerating_overwrites_previous_entries() {
        let secrets = Arc::new(RecordingSecrets::default());
        let cache = Arc::new(RecordingCache::default());
        let app = test_app!(config(true), secrets.clone(), cache.clone());

        for _ in 0..2 {
            let req = test::TestRequest::post()
                .uri("/api/KeyGenRequest")
                .set_json(json!({ "userName": "alice", "apiKey": "xyz123" }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
        }

        assert_eq!(secrets.len(), 1);
        assert_eq!(secrets.stored("alice").as_deref(), Some("xyz123"));
        assert_eq!(cache.stored("xyz123").as_deref(), Some("alice"));
    }
}
