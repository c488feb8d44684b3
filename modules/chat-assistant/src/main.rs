//! Chat Assistant Module Service — the college FAQ chatbot.
//!
//! Wraps a hosted generation API behind a small RPC API for the backend. Each
//! request carries the whole conversation; nothing is stored here.
//!
//! Default: http://127.0.0.1:9110/

mod generation_client;
mod prompt;
mod routes;

use generation_client::GenerationClient;
use routes::AppState;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use std::time::Instant;

const DEFAULT_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let port: u16 = std::env::var("CHAT_ASSISTANT_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(9110);

    let api_key = std::env::var("GENERATION_API_KEY")
        .ok()
        .filter(|k| !k.trim().is_empty());
    let model = std::env::var("GENERATION_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
    let api_base =
        std::env::var("GENERATION_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());

    if api_key.is_none() {
        log::warn!("GENERATION_API_KEY is not set; every chat will fail until it is configured");
    }
    log::info!("Using generation model {} at {}", model, api_base);

    let state = Arc::new(AppState {
        generator: GenerationClient::new(&api_base, api_key, &model),
        system_prompt: prompt::system_prompt(),
        start_time: Instant::now(),
        chat_count: AtomicU64::new(0),
        failure_count: AtomicU64::new(0),
    });

    let cors = tower_http::cors::CorsLayer::permissive();
    let app = routes::router(state).layer(cors);

    let addr = format!("127.0.0.1:{}", port);
    log::info!("Chat Assistant Module Service listening on http://{}", addr);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            log::error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        log::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
