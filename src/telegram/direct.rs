//! Direct-IP Telegram sender
//!
//! Last-resort delivery path for hosts where DNS resolution of
//! api.telegram.org fails. Dials known datacenter addresses directly,
//! cycling through all of them in rounds with exponential backoff between
//! rounds.

use std::time::Duration;

use reqwest::header::HOST;
use tracing::{error, info, instrument};

use crate::{
    config::{Config, DEFAULT_FALLBACK_ENDPOINTS},
    error::{AppError, AppResult},
    metrics,
    telegram::client::SendMessagePayload,
};

/// Hostname presented to the API when dialing an IP literal
const TELEGRAM_HOST: &str = "api.telegram.org";

/// Configuration for the direct-IP sender
#[derive(Debug, Clone)]
pub struct DirectSenderConfig {
    /// Base URLs tried in order within each round
    pub endpoints: Vec<String>,
    /// Rounds through the endpoint list before giving up
    pub max_rounds: u32,
    /// Delay after the first unsuccessful round; doubles per round
    pub base_delay: Duration,
}

impl Default for DirectSenderConfig {
    fn default() -> Self {
        Self {
            endpoints: DEFAULT_FALLBACK_ENDPOINTS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            max_rounds: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

/// Direct-IP Telegram sender
///
/// Keeps its own HTTP client: certificate names cannot match an IP literal,
/// so verification is disabled here and nowhere else.
pub struct DirectSender {
    client: reqwest::Client,
    bot_token: Option<String>,
    chat_id: Option<String>,
    config: DirectSenderConfig,
}

impl DirectSender {
    /// Create a sender using the endpoint list from the app configuration
    pub fn new(config: &Config) -> AppResult<Self> {
        let sender_config = DirectSenderConfig {
            endpoints: config.telegram_fallback_endpoints.clone(),
            ..DirectSenderConfig::default()
        };
        Self::with_config(config, sender_config)
    }

    /// Create a sender with explicit endpoint and pacing settings
    pub fn with_config(config: &Config, sender_config: DirectSenderConfig) -> AppResult<Self> {
        // IP-literal dialing: HTTP/1.1 with an explicit Host header and no
        // certificate name checks, (5 s connect, 15 s total) timeouts
        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(true)
            .http1_only()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(AppError::from)?;

        Ok(Self {
            client,
            bot_token: config
                .telegram_bot_token
                .clone()
                .filter(|s| !s.is_empty()),
            chat_id: config.telegram_chat_id.clone().filter(|s| !s.is_empty()),
            config: sender_config,
        })
    }

    /// Send a message, trying every endpoint for the configured rounds
    pub async fn send(&self, text: &str) -> bool {
        self.send_with_rounds(text, self.config.max_rounds).await
    }

    /// Send a message with an explicit round count
    ///
    /// Returns on the first successful endpoint. Between unsuccessful
    /// rounds waits `base_delay * 2^round`; no wait after the last round.
    /// Missing credentials fail immediately with zero network attempts.
    #[instrument(skip(self, text), fields(text_len = text.len(), rounds))]
    pub async fn send_with_rounds(&self, text: &str, rounds: u32) -> bool {
        let (bot_token, chat_id) = match (self.bot_token.as_deref(), self.chat_id.as_deref()) {
            (Some(token), Some(chat)) => (token, chat),
            _ => {
                error!("Invalid Telegram configuration - missing bot token or chat ID");
                return false;
            }
        };

        for round in 0..rounds {
            for endpoint in &self.config.endpoints {
                info!(
                    endpoint = %endpoint,
                    attempt = round + 1,
                    rounds,
                    "Attempting Telegram delivery via direct endpoint"
                );

                match self.attempt(endpoint, bot_token, chat_id, text).await {
                    Ok(()) => {
                        metrics::record_notify_attempt("direct", "success");
                        info!(endpoint = %endpoint, "Message sent successfully via direct endpoint");
                        return true;
                    }
                    Err(e) => {
                        metrics::record_notify_attempt("direct", "failure");
                        error!(
                            endpoint = %endpoint,
                            attempt = round + 1,
                            error = %e,
                            "Direct endpoint delivery failed"
                        );
                    }
                }
            }

            if round + 1 < rounds {
                let delay = round_delay(self.config.base_delay, round);
                info!(
                    delay_ms = delay.as_millis() as u64,
                    "Waiting before next delivery round"
                );
                tokio::time::sleep(delay).await;
            }
        }

        false
    }

    async fn attempt(
        &self,
        endpoint: &str,
        bot_token: &str,
        chat_id: &str,
        text: &str,
    ) -> AppResult<()> {
        let url = format!("{}/bot{}/sendMessage", endpoint, bot_token);
        let payload = SendMessagePayload {
            chat_id,
            text,
            parse_mode: "HTML",
        };

        let response = self
            .client
            .post(&url)
            .header(HOST, TELEGRAM_HOST)
            .form(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::UpstreamError(format!(
                "Telegram API error {}: {}",
                status, body
            )));
        }

        Ok(())
    }
}

/// Delay before the round after `round` (zero-based): `base * 2^round`
pub fn round_delay(base: Duration, round: u32) -> Duration {
    base.saturating_mul(2u32.saturating_pow(round))
}
