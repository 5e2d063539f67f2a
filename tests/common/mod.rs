//! Common test utilities for Herald
//!
//! This module provides shared test fixtures, config builders and polling
//! helpers used across the integration tests.

#![allow(dead_code)]

use std::time::Duration;

use herald::Config;
use tokio::time::Instant;

use crate::mocks::telegram::MockTelegram;

/// Test configuration constants
pub mod constants {
    /// Default test API key for OpenAI
    pub const TEST_OPENAI_API_KEY: &str = "test-openai-api-key";
    /// Test bot token in the Bot API shape (not a real credential)
    pub const TEST_BOT_TOKEN: &str = "123456:TEST-TOKEN";
    /// Chat that receives test notifications
    pub const TEST_CHAT_ID: &str = "424242";
    /// Primary chat model used in tests
    pub const TEST_PRIMARY_MODEL: &str = "gpt-4o-mini";
    /// Fallback chat model used in tests
    pub const TEST_FALLBACK_MODEL: &str = "gpt-3.5-turbo";
}

/// A local address nothing listens on, for the side of the config a test
/// does not exercise
pub const UNUSED_URL: &str = "http://127.0.0.1:9";

/// Create a fully configured Config pointing at mock servers
pub fn test_config(openai_url: &str, telegram_url: &str) -> Config {
    Config {
        openai_api_url: openai_url.to_string(),
        openai_api_key: Some(constants::TEST_OPENAI_API_KEY.to_string()),
        openai_model: constants::TEST_PRIMARY_MODEL.to_string(),
        openai_model_fallback: constants::TEST_FALLBACK_MODEL.to_string(),
        telegram_api_url: telegram_url.to_string(),
        telegram_bot_token: Some(constants::TEST_BOT_TOKEN.to_string()),
        telegram_chat_id: Some(constants::TEST_CHAT_ID.to_string()),
        telegram_fallback_endpoints: vec![],
    }
}

/// Wait for requests to arrive at the mock Telegram server
///
/// Polls the mock until at least `min_count` requests were recorded or the
/// timeout is reached, then returns whatever arrived. Used to observe the
/// background notification queue without sleeping for fixed intervals.
pub async fn wait_for_telegram_requests(
    mock: &MockTelegram,
    min_count: usize,
    timeout: Duration,
) -> Vec<wiremock::Request> {
    let start = Instant::now();
    loop {
        let requests = mock.received_requests().await;
        if requests.len() >= min_count {
            return requests;
        }
        if start.elapsed() > timeout {
            return requests; // Return what we have
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
}

/// Decode a form-encoded request body to a string
pub fn form_body(request: &wiremock::Request) -> String {
    String::from_utf8_lossy(&request.body).into_owned()
}

/// Parse a JSON request body
pub fn json_body(request: &wiremock::Request) -> serde_json::Value {
    serde_json::from_slice(&request.body).expect("Failed to parse JSON request body")
}
