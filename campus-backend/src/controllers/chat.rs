use actix_web::{web, HttpResponse, Responder};
use chat_assistant_types::ChatRequest;
use serde::Serialize;

use crate::AppState;

const MAX_MESSAGE_CHARS: usize = 2_000;
const MAX_HISTORY_TURNS: usize = 40;

#[derive(Serialize)]
struct ChatResponse {
    success: bool,
    reply: String,
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/chat").route(web::post().to(chat)));
}

/// Always 200: a failed generation still yields a message the widget can show.
async fn chat(state: web::Data<AppState>, body: web::Json<ChatRequest>) -> impl Responder {
    let mut request = body.into_inner();
    request.message = request.message.trim().to_string();

    if request.message.is_empty() {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "success": false,
            "error": "Message must not be empty"
        }));
    }
    if request.message.chars().count() > MAX_MESSAGE_CHARS {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "success": false,
            "error": format!("Message must be at most {} characters", MAX_MESSAGE_CHARS)
        }));
    }
    if request.history.len() > MAX_HISTORY_TURNS {
        let excess = request.history.len() - MAX_HISTORY_TURNS;
        request.history.drain(..excess);
    }

    let (success, reply) = state.chat.reply_or_fallback(&request).await;
    HttpResponse::Ok().json(ChatResponse { success, reply })
}
