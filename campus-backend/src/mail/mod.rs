//! Outbound transactional email.

mod http_mailer;
pub mod templates;

pub use http_mailer::HttpMailer;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::ActionError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmailMessage {
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send one message. Errors carry a message fit to show the submitter.
    async fn send(&self, message: EmailMessage) -> Result<(), ActionError>;
}
