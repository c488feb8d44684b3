//! Axum route handlers for the chat-assistant module RPC API.

use crate::generation_client::{build_request, GenerationClient};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use chat_assistant_types::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

pub struct AppState {
    pub generator: GenerationClient,
    pub system_prompt: String,
    pub start_time: Instant,
    pub chat_count: AtomicU64,
    pub failure_count: AtomicU64,
}

// POST /rpc/chat
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> (StatusCode, Json<RpcResponse<ChatReply>>) {
    let message = req.message.trim();
    if message.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(RpcResponse::err("message is empty")),
        );
    }

    let request = build_request(&state.system_prompt, &req.history, message);
    state.chat_count.fetch_add(1, Ordering::Relaxed);

    match state.generator.generate(&request).await {
        Ok(reply) => (StatusCode::OK, Json(RpcResponse::ok(ChatReply { reply }))),
        Err(e) => {
            state.failure_count.fetch_add(1, Ordering::Relaxed);
            log::error!("[CHAT] Generation failed: {}", e);
            (StatusCode::BAD_GATEWAY, Json(RpcResponse::err(e)))
        }
    }
}

// GET /rpc/status
pub async fn status(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<RpcResponse<ServiceStatus>>) {
    let status = ServiceStatus {
        running: true,
        uptime_secs: state.start_time.elapsed().as_secs(),
        model: state.generator.model().to_string(),
        api_key_configured: state.generator.has_api_key(),
        total_chats: state.chat_count.load(Ordering::Relaxed),
        failed_chats: state.failure_count.load(Ordering::Relaxed),
    };

    (StatusCode::OK, Json(RpcResponse::ok(status)))
}

pub fn router(state: Arc<AppState>) -> axum::Router {
    axum::Router::new()
        .route("/rpc/chat", axum::routing::post(chat))
        .route("/rpc/status", axum::routing::get(status))
        .with_state(state)
}
