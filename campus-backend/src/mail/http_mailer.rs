use async_trait::async_trait;
use serde_json::json;

use super::{EmailMessage, Mailer};
use crate::config::EmailConfig;
use crate::error::ActionError;
use crate::http::shared_client;

/// Sends through a Resend-style JSON email API.
pub struct HttpMailer {
    config: EmailConfig,
}

impl HttpMailer {
    pub fn new(config: EmailConfig) -> Self {
        if config.api_key.is_none() {
            log::warn!("[MAIL] EMAIL_API_KEY not set; form notifications will fail");
        }
        Self { config }
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, message: EmailMessage) -> Result<(), ActionError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| ActionError::Mail("Email service is not configured".to_string()))?;

        let body = json!({
            "from": self.config.from,
            "to": message.to,
            "subject": message.subject,
            "html": message.html,
            "reply_to": message.reply_to,
        });

        let resp = shared_client()
            .post(&self.config.api_url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                log::error!("[MAIL] Email API unreachable: {}", e);
                ActionError::Mail(format!("Failed to send email: {}", e))
            })?;

        let status = resp.status();
        if status.is_success() {
            log::info!("[MAIL] Sent '{}' to {}", message.subject, message.to.join(", "));
            return Ok(());
        }

        let raw = resp.text().await.unwrap_or_default();
        log::error!("[MAIL] Email API returned {}: {}", status, raw);
        Err(ActionError::Mail(error_message_from_body(status.as_u16(), &raw)))
    }
}

/// Pull the human-readable reason out of an email API error body.
pub(crate) fn error_message_from_body(status: u16, raw: &str) -> String {
    let detail = serde_json::from_str::<serde_json::Value>(raw)
        .ok()
        .and_then(|v| {
            v.get("message")
                .or_else(|| v.get("error").and_then(|e| e.get("message").or(Some(e))))
                .and_then(|m| m.as_str().map(|s| s.to_string()))
        })
        .unwrap_or_else(|| raw.trim().to_string());

    if detail.is_empty() {
        format!("Failed to send email (HTTP {})", status)
    } else {
        format!("Failed to send email: {}", detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_json_message_field() {
        assert_eq!(
            error_message_from_body(422, r#"{"statusCode":422,"message":"Invalid `to` field","name":"validation_error"}"#),
            "Failed to send email: Invalid `to` field"
        );
        assert_eq!(
            error_message_from_body(401, r#"{"error":{"message":"API key is invalid"}}"#),
            "Failed to send email: API key is invalid"
        );
        assert_eq!(error_message_from_body(502, "Bad Gateway"), "Failed to send email: Bad Gateway");
        assert_eq!(error_message_from_body(500, ""), "Failed to send email (HTTP 500)");
    }

    #[tokio::test]
    async fn test_unconfigured_mailer_fails_without_network() {
        let mailer = HttpMailer::new(EmailConfig {
            api_url: "http://127.0.0.1:9/emails".to_string(),
            api_key: None,
            from: "a@b.c".to_string(),
            notify_to: "d@e.f".to_string(),
        });
        let err = mailer
            .send(EmailMessage {
                to: vec!["x@y.z".to_string()],
                subject: "s".to_string(),
                html: "h".to_string(),
                reply_to: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Email service is not configured");
    }
}
