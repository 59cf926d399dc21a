mod cors;

use actix_web::{App, HttpServer, web};
use common::env_config::Config;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // get env vars
    let config = Config::from_env();
    let config_data = config.clone();
    let origin = config.cors_allowed_origin.clone();

    // init logger
    if config.console_logging_enabled {
        logger::setup(&config.log_level, &config.log_file).expect("Failed to set up logger");
    }

    // init backends, shared by every worker
    let secrets = stores::setup_secret_store(&config).expect("Failed to set up Key Vault client");
    let cache = stores::setup_cache(&config).expect("Failed to set up Redis cache");

    log::info!(
        "Starting {} server on {}:{} (vault: {}, save to cache: {})",
        config.environment,
        config.server_host,
        config.server_port,
        secrets.location(),
        config.save_to_cache
    );

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(config_data.clone()))
            .app_data(web::Data::from(secrets.clone()))
            .app_data(web::Data::from(cache.clone()))
            .wrap(logger::middleware()) // 2nd
            .wrap(cors::middleware(&origin)) // 1st
            .service(api_keys::mount_keys())
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .workers(config.num_workers)
    .run()
    .await
}
