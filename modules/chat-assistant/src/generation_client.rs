//! Typed HTTP client for the hosted generation API (`models/{model}:generateContent`).

use chat_assistant_types::{ChatRole, ChatTurn};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const REQUEST_TIMEOUT_SECS: u64 = 60;

pub struct GenerationClient {
    base_url: String,
    api_key: Option<String>,
    model: String,
    client: reqwest::Client,
}

// ── Generation API types ────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub system_instruction: Content,
    pub contents: Vec<Content>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

fn text_content(role: Option<&str>, text: &str) -> Content {
    Content {
        role: role.map(|r| r.to_string()),
        parts: vec![Part { text: Some(text.to_string()) }],
    }
}

/// Conversation so far plus the new user message, with the FAQ prompt as the
/// system instruction. The API calls the assistant side `model`.
pub fn build_request(system_prompt: &str, history: &[ChatTurn], message: &str) -> GenerateRequest {
    let mut contents: Vec<Content> = history
        .iter()
        .filter(|turn| !turn.text.trim().is_empty())
        .map(|turn| {
            let role = match turn.role {
                ChatRole::User => "user",
                ChatRole::Assistant => "model",
            };
            text_content(Some(role), &turn.text)
        })
        .collect();
    contents.push(text_content(Some("user"), message));

    GenerateRequest {
        system_instruction: text_content(None, system_prompt),
        contents,
    }
}

/// Concatenated text of the first candidate.
pub fn reply_text(response: GenerateResponse) -> Result<String, String> {
    let blocked = response
        .prompt_feedback
        .as_ref()
        .and_then(|f| f.block_reason.clone());

    let Some(candidate) = response.candidates.into_iter().next() else {
        return Err(match blocked {
            Some(reason) => format!("Prompt blocked: {}", reason),
            None => "Generation returned no candidates".to_string(),
        });
    };

    let text: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        Err("Generation returned an empty reply".to_string())
    } else {
        Ok(text.trim().to_string())
    }
}

/// `error.message` from an API error body, else the raw body.
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(|s| s.to_string()))
        .unwrap_or_else(|| body.trim().to_string())
}

// ── Client impl ─────────────────────────────────────

impl GenerationClient {
    pub fn new(base_url: &str, api_key: Option<String>, model: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|e| {
                log::warn!("Failed to build HTTP client ({}), using defaults", e);
                reqwest::Client::new()
            });
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model: model.to_string(),
            client,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// One generation call, no retry.
    pub async fn generate(&self, request: &GenerateRequest) -> Result<String, String> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err("GENERATION_API_KEY is not configured".to_string());
        };

        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| format!("Generation request failed: {}", e))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(format!("Generation HTTP {}: {}", status.as_u16(), api_error_message(&body)));
        }

        let parsed: GenerateResponse = resp
            .json()
            .await
            .map_err(|e| format!("Invalid generation response: {}", e))?;
        reply_text(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_maps_roles_and_appends_message() {
        let history = vec![
            ChatTurn { role: ChatRole::User, text: "Hi".into() },
            ChatTurn { role: ChatRole::Assistant, text: "Hello! How can I help?".into() },
            ChatTurn { role: ChatRole::User, text: "   ".into() },
        ];
        let request = build_request("SYSTEM", &history, "When do applications close?");
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["systemInstruction"], json!({ "parts": [{ "text": "SYSTEM" }] }));
        let roles: Vec<_> = value["contents"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["role"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(roles, vec!["user", "model", "user"]);
        assert_eq!(value["contents"][2]["parts"][0]["text"], "When do applications close?");
    }

    #[test]
    fn test_reply_text_concatenates_first_candidate() {
        let response: GenerateResponse = serde_json::from_value(json!({
            "candidates": [
                { "content": { "role": "model", "parts": [{ "text": "Applications close " }, { "text": "on March 1." }] } },
                { "content": { "role": "model", "parts": [{ "text": "ignored" }] } }
            ]
        }))
        .unwrap();
        assert_eq!(reply_text(response).unwrap(), "Applications close on March 1.");
    }

    #[test]
    fn test_reply_text_reports_block_reason() {
        let response: GenerateResponse = serde_json::from_value(json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        }))
        .unwrap();
        assert_eq!(reply_text(response).unwrap_err(), "Prompt blocked: SAFETY");
    }

    #[test]
    fn test_api_error_message() {
        assert_eq!(
            api_error_message(r#"{"error":{"code":400,"message":"API key not valid."}}"#),
            "API key not valid."
        );
        assert_eq!(api_error_message("Bad Gateway"), "Bad Gateway");
    }
}
