//! Chat flow client: forwards conversations to the chat-assistant module
//! service over its RPC API.

use chat_assistant_types::{ChatReply, ChatRequest, RpcResponse};

use crate::http::shared_client;

/// Shown to the visitor whenever the assistant cannot answer.
pub const FALLBACK_REPLY: &str =
    "Sorry, I'm having trouble answering right now. Please try again later.";

#[derive(Debug, Clone)]
pub struct ChatAssistantClient {
    base_url: String,
}

impl ChatAssistantClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// One round trip. Errors are human-readable and meant for logs only.
    pub async fn chat(&self, request: &ChatRequest) -> Result<String, String> {
        let url = format!("{}/rpc/chat", self.base_url);
        let resp: RpcResponse<ChatReply> = shared_client()
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| format!("Chat assistant service unavailable: {}", e))?
            .json()
            .await
            .map_err(|e| format!("Invalid response from chat assistant service: {}", e))?;

        match resp.data {
            Some(reply) if resp.success => Ok(reply.reply),
            _ => Err(resp.error.unwrap_or_else(|| "Unknown error".to_string())),
        }
    }

    /// The assistant's reply, or the fixed apology when anything went wrong.
    pub async fn reply_or_fallback(&self, request: &ChatRequest) -> (bool, String) {
        match self.chat(request).await {
            Ok(reply) => (true, reply),
            Err(e) => {
                log::error!("[CHAT] {}", e);
                (false, FALLBACK_REPLY.to_string())
            }
        }
    }
}
