use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

pub const DEFAULT_API_BASE_URL: &str = "https://ratemycoop.io/api";

/// Client configuration loaded from environment variables (and `.env` when present).
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub access_token: Option<String>,
    pub user_id: Option<i64>,
    pub request_timeout: Duration,
    /// Upper bound for each reference-data fetch before it is marked failed.
    pub reference_timeout: Duration,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            api_base_url: optional_env("API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            access_token: optional_env("ACCESS_TOKEN"),
            user_id: optional_env("USER_ID")
                .map(|raw| raw.parse::<i64>())
                .transpose()
                .context("USER_ID must be an integer account id")?,
            request_timeout: Duration::from_secs(parse_env("REQUEST_TIMEOUT_SECS", 30)?),
            reference_timeout: Duration::from_secs(parse_env("REFERENCE_TIMEOUT_SECS", 10)?),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        None => Ok(default),
    }
}
