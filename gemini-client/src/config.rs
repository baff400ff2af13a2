//! Backend configuration loaded from environment variables.

use anyhow::{Context, Result};
use std::env;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-pro";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Gemini config from env: GEMINI_API_KEY (required), GEMINI_MODEL, GEMINI_BASE_URL,
/// GEMINI_TIMEOUT_SECS (all optional with defaults).
#[derive(Debug, Clone)]
pub struct EnvGeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl EnvGeminiConfig {
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("GEMINI_API_KEY").context("GEMINI_API_KEY not set")?;
        let model = env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let base_url = env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let timeout_secs = env::var("GEMINI_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Ok(Self {
            api_key,
            model,
            base_url,
            timeout_secs,
        })
    }
}
