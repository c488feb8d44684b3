//! Process-wide outbound HTTP client.

use once_cell::sync::Lazy;
use std::time::Duration;

static SHARED_CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .build()
        .unwrap_or_else(|e| {
            log::warn!("Failed to build configured HTTP client ({}), using defaults", e);
            reqwest::Client::new()
        })
});

/// Connection-pooled client shared by the mailer, chat RPC and revalidation hook.
pub fn shared_client() -> &'static reqwest::Client {
    &SHARED_CLIENT
}
