use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::llm_client::DEFAULT_BASE_URL;

/// Settings shared by both binaries for reaching the completion API.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: String,
    pub base_url: String,
}

impl LlmConfig {
    fn from_env() -> Result<Self> {
        Ok(LlmConfig {
            api_key: require_env("OPENAI_API_KEY")?,
            base_url: optional_env("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        })
    }
}

/// Web API configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub llm: LlmConfig,
    pub serp_api_key: String,
    pub port: u16,
    pub max_upload_bytes: usize,
    pub rust_log: String,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(ServerConfig {
            llm: LlmConfig::from_env()?,
            serp_api_key: require_env("SERP_API_KEY")?,
            port: parse_env("PORT", 8080)?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
            rust_log: rust_log(),
        })
    }
}

/// Job QA batch configuration.
#[derive(Debug, Clone)]
pub struct QaConfig {
    pub llm: LlmConfig,
    pub database_url: String,
    pub role_model_path: Option<PathBuf>,
    pub activity_checks: bool,
    pub company_delay: Duration,
    pub liveness_timeout: Duration,
    pub rust_log: String,
}

impl QaConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(QaConfig {
            llm: LlmConfig::from_env()?,
            database_url: require_env("DATABASE_URL")?,
            role_model_path: optional_env("ROLE_MODEL_PATH").map(PathBuf::from),
            activity_checks: parse_env("QA_ACTIVITY_CHECKS", true)?,
            company_delay: Duration::from_secs(parse_env("QA_COMPANY_DELAY_SECS", 5)?),
            liveness_timeout: Duration::from_secs(parse_env("LIVENESS_TIMEOUT_SECS", 5)?),
            rust_log: rust_log(),
        })
    }
}

fn rust_log() -> String {
    std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        None => Ok(default),
    }
}
