use actix_cors::Cors;
use actix_web::{error::InternalError, middleware::Logger, web, App, HttpResponse, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;
use std::time::{Duration, Instant};

mod actions;
mod cache;
mod chat_client;
mod config;
mod controllers;
mod db;
mod error;
pub mod http;
mod mail;
mod models;
mod storage;

use actions::Actions;
use cache::PageCache;
use chat_client::ChatAssistantClient;
use config::Config;
use db::Database;
use error::ActionResponse;
use mail::HttpMailer;
use storage::LocalObjectStore;

pub struct AppState {
    pub db: Arc<Database>,
    pub config: Config,
    /// Content writes and form submissions
    pub actions: Actions,
    pub chat: ChatAssistantClient,
    /// Server start time for uptime calculation
    pub started_at: Instant,
}

/// Malformed JSON bodies get the same `{ success, message }` envelope as
/// validation failures.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(1024 * 1024)
        .error_handler(|err, _req| {
            let message = format!("Invalid request body: {}", err);
            InternalError::from_response(err, HttpResponse::BadRequest().json(ActionResponse::failure(message)))
                .into()
        })
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Campus backend v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env();
    let port = config.port;

    log::info!("Initializing database at {}", config.database_url);
    let db = Database::new(&config.database_url).map_err(|e| {
        log::error!("Failed to initialize database: {}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;
    let db = Arc::new(db);

    std::fs::create_dir_all(&config.media_dir)?;
    log::info!(
        "Serving media from {:?} at {}",
        config.media_dir,
        config.media_base_url()
    );
    let store = Arc::new(LocalObjectStore::new(&config.media_dir, config.media_base_url()));
    let mailer = Arc::new(HttpMailer::new(config.email.clone()));
    let cache = PageCache::new(
        Duration::from_secs(config.page_cache_ttl_secs),
        config.revalidate_webhook_url.clone(),
    );
    let actions = Actions::new(
        Arc::clone(&db),
        store,
        mailer,
        cache,
        config.email.notify_to.clone(),
    );
    let chat = ChatAssistantClient::new(&config.chat_assistant_url);

    if config.admin_password.is_none() {
        log::warn!("ADMIN_PASSWORD is not set; admin login is disabled");
    }
    log::info!("Chat assistant service: {}", config.chat_assistant_url);

    let state = web::Data::new(AppState {
        db: Arc::clone(&db),
        config: config.clone(),
        actions,
        chat,
        started_at: Instant::now(),
    });

    log::info!("Starting HTTP server on port {}", port);

    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(state.clone())
            .app_data(json_config())
            .wrap(Logger::default())
            .wrap(cors)
            .configure(controllers::health::config_routes)
            .configure(controllers::auth::config)
            .configure(controllers::news::config)
            .configure(controllers::academics::config)
            .configure(controllers::careers::config)
            .configure(controllers::sections::config)
            .configure(controllers::site_content::config)
            .configure(controllers::alumni::config)
            .configure(controllers::submissions::config)
            .configure(controllers::chat::config)
            .configure(controllers::upload::config)
            .configure(controllers::media::config)
    })
    .bind(("0.0.0.0", port))?
    .run();

    let server_handle = server.handle();

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl+C: {}", e);
            return;
        }
        log::info!("Received Ctrl+C, shutting down...");

        let server_stop = server_handle.stop(true);
        if tokio::time::timeout(Duration::from_secs(5), server_stop).await.is_err() {
            log::warn!("Timeout waiting for HTTP server to stop, forcing exit...");
        }

        log::info!("Shutdown complete");
    });

    server.await
}
