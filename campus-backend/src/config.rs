use std::env;
use std::path::PathBuf;

/// Environment variable names - single source of truth
pub mod env_vars {
    pub const PORT: &str = "PORT";
    pub const DATABASE_URL: &str = "DATABASE_URL";
    pub const MEDIA_DIR: &str = "MEDIA_DIR";
    /// Externally reachable base URL, used to build absolute media URLs.
    pub const PUBLIC_URL: &str = "PUBLIC_URL";
    pub const ADMIN_USERNAME: &str = "ADMIN_USERNAME";
    pub const ADMIN_PASSWORD: &str = "ADMIN_PASSWORD";
    pub const EMAIL_API_URL: &str = "EMAIL_API_URL";
    pub const EMAIL_API_KEY: &str = "EMAIL_API_KEY";
    pub const EMAIL_FROM: &str = "EMAIL_FROM";
    pub const EMAIL_NOTIFY_TO: &str = "EMAIL_NOTIFY_TO";
    pub const CHAT_ASSISTANT_URL: &str = "CHAT_ASSISTANT_URL";
    /// Optional frontend hook that receives `{ "paths": [...] }` after content writes.
    pub const REVALIDATE_WEBHOOK_URL: &str = "REVALIDATE_WEBHOOK_URL";
    pub const PAGE_CACHE_TTL_SECS: &str = "PAGE_CACHE_TTL_SECS";
    pub const MAX_UPLOAD_MB: &str = "MAX_UPLOAD_MB";
}

/// Default values
pub mod defaults {
    pub const PORT: u16 = 8080;
    pub const DATABASE_URL: &str = "./.db/campus.db";
    pub const MEDIA_DIR: &str = "./media";
    pub const ADMIN_USERNAME: &str = "admin";
    pub const EMAIL_API_URL: &str = "https://api.resend.com/emails";
    pub const EMAIL_FROM: &str = "College Website <noreply@college.example.edu>";
    pub const EMAIL_NOTIFY_TO: &str = "admissions@college.example.edu";
    pub const CHAT_ASSISTANT_URL: &str = "http://127.0.0.1:9110";
    pub const PAGE_CACHE_TTL_SECS: u64 = 300;
    pub const MAX_UPLOAD_MB: usize = 100;
}

#[derive(Clone, Debug)]
pub struct EmailConfig {
    pub api_url: String,
    pub api_key: Option<String>,
    pub from: String,
    pub notify_to: String,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub media_dir: PathBuf,
    pub public_url: String,
    pub admin_username: String,
    /// Admin login is disabled when no password is configured.
    pub admin_password: Option<String>,
    pub email: EmailConfig,
    pub chat_assistant_url: String,
    pub revalidate_webhook_url: Option<String>,
    pub page_cache_ttl_secs: u64,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Self {
        let port = parse_var(env_vars::PORT, defaults::PORT);

        let public_url = env::var(env_vars::PUBLIC_URL)
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| format!("http://localhost:{}", port));

        Self {
            port,
            database_url: env::var(env_vars::DATABASE_URL)
                .unwrap_or_else(|_| defaults::DATABASE_URL.to_string()),
            media_dir: PathBuf::from(
                env::var(env_vars::MEDIA_DIR).unwrap_or_else(|_| defaults::MEDIA_DIR.to_string()),
            ),
            public_url,
            admin_username: env::var(env_vars::ADMIN_USERNAME)
                .unwrap_or_else(|_| defaults::ADMIN_USERNAME.to_string()),
            admin_password: non_empty_var(env_vars::ADMIN_PASSWORD),
            email: EmailConfig {
                api_url: env::var(env_vars::EMAIL_API_URL)
                    .unwrap_or_else(|_| defaults::EMAIL_API_URL.to_string()),
                api_key: non_empty_var(env_vars::EMAIL_API_KEY),
                from: env::var(env_vars::EMAIL_FROM)
                    .unwrap_or_else(|_| defaults::EMAIL_FROM.to_string()),
                notify_to: env::var(env_vars::EMAIL_NOTIFY_TO)
                    .unwrap_or_else(|_| defaults::EMAIL_NOTIFY_TO.to_string()),
            },
            chat_assistant_url: env::var(env_vars::CHAT_ASSISTANT_URL)
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| defaults::CHAT_ASSISTANT_URL.to_string()),
            revalidate_webhook_url: non_empty_var(env_vars::REVALIDATE_WEBHOOK_URL),
            page_cache_ttl_secs: parse_var(
                env_vars::PAGE_CACHE_TTL_SECS,
                defaults::PAGE_CACHE_TTL_SECS,
            ),
            max_upload_bytes: parse_var(env_vars::MAX_UPLOAD_MB, defaults::MAX_UPLOAD_MB)
                * 1024
                * 1024,
        }
    }

    /// Base URL that stored media is reachable under.
    pub fn media_base_url(&self) -> String {
        format!("{}/media", self.public_url)
    }
}

#[cfg(test)]
impl Config {
    /// Local-only configuration rooted at `media_dir`, with admin login enabled.
    pub(crate) fn for_tests(media_dir: PathBuf) -> Self {
        Self {
            port: defaults::PORT,
            database_url: ":memory:".to_string(),
            media_dir,
            public_url: "http://localhost:8080".to_string(),
            admin_username: defaults::ADMIN_USERNAME.to_string(),
            admin_password: Some("correct horse".to_string()),
            email: EmailConfig {
                api_url: "http://127.0.0.1:9/emails".to_string(),
                api_key: None,
                from: defaults::EMAIL_FROM.to_string(),
                notify_to: defaults::EMAIL_NOTIFY_TO.to_string(),
            },
            // Nothing listens on the discard port.
            chat_assistant_url: "http://127.0.0.1:9".to_string(),
            revalidate_webhook_url: None,
            page_cache_ttl_secs: 60,
            max_upload_bytes: 1024,
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Read and parse an env var, falling back to the default (with a warning) when
/// the value is present but malformed.
fn parse_var<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|e| {
            log::warn!("Invalid {} value '{}': {}. Using default {}", key, raw, e, default);
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_var_falls_back_on_garbage() {
        // SAFETY: test-local variable name, not read concurrently elsewhere
        unsafe { env::set_var("CAMPUS_TEST_PARSE_VAR", "not-a-number") };
        assert_eq!(parse_var("CAMPUS_TEST_PARSE_VAR", 42u16), 42);
        unsafe { env::set_var("CAMPUS_TEST_PARSE_VAR", " 7 ") };
        assert_eq!(parse_var("CAMPUS_TEST_PARSE_VAR", 42u16), 7);
        unsafe { env::remove_var("CAMPUS_TEST_PARSE_VAR") };
    }
}
