use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_ANALYSIS_API_URL: &str = "http://localhost:5000";

/// Application configuration loaded from environment variables.
/// Every variable has a default suited to running next to a local analysis service.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the analysis service; `/api/profile` is appended.
    pub analysis_api_url: String,
    pub analysis_timeout: Duration,
    pub max_upload_mb: usize,
    pub max_concurrent_analyses: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        let defaults = Config::default();

        Ok(Config {
            analysis_api_url: std::env::var("ANALYSIS_API_URL")
                .unwrap_or(defaults.analysis_api_url),
            analysis_timeout: Duration::from_secs(parse_env(
                "ANALYSIS_TIMEOUT_SECS",
                defaults.analysis_timeout.as_secs(),
            )?),
            max_upload_mb: parse_env("MAX_UPLOAD_MB", defaults.max_upload_mb)?,
            max_concurrent_analyses: parse_env(
                "MAX_CONCURRENT_ANALYSES",
                defaults.max_concurrent_analyses,
            )?,
            port: parse_env("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
        })
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb * 1024 * 1024
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            analysis_api_url: DEFAULT_ANALYSIS_API_URL.to_string(),
            analysis_timeout: Duration::from_secs(120),
            max_upload_mb: 10,
            max_concurrent_analyses: 1,
            port: 8080,
            rust_log: "info".to_string(),
        }
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}
