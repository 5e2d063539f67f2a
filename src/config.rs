//! Configuration management for Herald
//!
//! Configuration is loaded from environment variables.

use anyhow::Result;
use std::env;

/// Known direct IP endpoints for api.telegram.org, used when DNS resolution
/// of the hostname fails on the deployment host.
pub const DEFAULT_FALLBACK_ENDPOINTS: [&str; 5] = [
    "https://149.154.167.220",
    "https://149.154.167.222",
    "https://149.154.165.120",
    "https://91.108.4.5",
    "https://91.108.56.100",
];

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// OpenAI API URL
    pub openai_api_url: String,
    /// OpenAI API key (chat degrades to canned replies when absent)
    pub openai_api_key: Option<String>,
    /// Primary chat model
    pub openai_model: String,
    /// Model retried once when the primary attempt fails
    pub openai_model_fallback: String,

    /// Telegram Bot API base URL
    pub telegram_api_url: String,
    /// Telegram bot token
    pub telegram_bot_token: Option<String>,
    /// Chat that receives notifications
    pub telegram_chat_id: Option<String>,
    /// Direct endpoints tried when the hostname path is unreachable
    pub telegram_fallback_endpoints: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            openai_api_url: env::var("OPENAI_API_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            openai_api_key: env::var("OPENAI_API_KEY").ok(),
            openai_model: env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            openai_model_fallback: env::var("OPENAI_MODEL_FALLBACK")
                .unwrap_or_else(|_| "gpt-3.5-turbo".to_string()),

            telegram_api_url: env::var("TELEGRAM_API_URL")
                .unwrap_or_else(|_| "https://api.telegram.org".to_string()),
            telegram_bot_token: env::var("TELEGRAM_BOT_TOKEN").ok(),
            telegram_chat_id: env::var("TELEGRAM_CHAT_ID").ok(),
            telegram_fallback_endpoints: env::var("TELEGRAM_FALLBACK_ENDPOINTS")
                .map(|raw| parse_endpoints(&raw))
                .unwrap_or_else(|_| {
                    DEFAULT_FALLBACK_ENDPOINTS
                        .iter()
                        .map(|s| s.to_string())
                        .collect()
                }),
        })
    }
}

/// Parse a comma-separated endpoint list, dropping empty entries
fn parse_endpoints(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.trim_end_matches('/').to_string())
        .collect()
}
