use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub api_key: String,
    pub access_token: Option<String>,
    pub storage_bucket: String,
    pub session_cache_path: PathBuf,
    pub page_size: usize,
    pub http_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            api_url: require_env("WORKHUB_API_URL")?
                .trim_end_matches('/')
                .to_string(),
            api_key: require_env("WORKHUB_API_KEY")?,
            access_token: std::env::var("WORKHUB_ACCESS_TOKEN")
                .ok()
                .filter(|t| !t.is_empty()),
            storage_bucket: std::env::var("WORKHUB_STORAGE_BUCKET")
                .unwrap_or_else(|_| "curricula".to_string()),
            session_cache_path: std::env::var("WORKHUB_SESSION_CACHE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".workhub/session.json")),
            page_size: parse_env("WORKHUB_PAGE_SIZE", 10)?,
            http_timeout_secs: parse_env("WORKHUB_HTTP_TIMEOUT_SECS", 30)?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_default_when_unset() {
        let value: usize = parse_env("WORKHUB_TEST_UNSET_PAGE_SIZE", 10).unwrap();
        assert_eq!(value, 10);
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("WORKHUB_TEST_BAD_TIMEOUT", "soon");
        let err = parse_env::<u64>("WORKHUB_TEST_BAD_TIMEOUT", 30).unwrap_err();
        assert!(err.to_string().contains("WORKHUB_TEST_BAD_TIMEOUT"));
    }

    #[test]
    fn test_require_env_names_missing_key() {
        let err = require_env("WORKHUB_TEST_MISSING_KEY").unwrap_err();
        assert!(err.to_string().contains("WORKHUB_TEST_MISSING_KEY"));
    }
}
