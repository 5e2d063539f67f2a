//! Telegram Bot API client
//!
//! Sends notifications through the regular hostname path with verified TLS.
//! The direct-IP fallback lives in [`super::direct`].

use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};

use crate::{
    config::Config,
    error::{AppError, AppResult},
    metrics,
    telegram::format::{self, ContactForm, TechSpecSubmission},
};

/// Immediate attempts made by [`TelegramClient::send_message_with_retry`]
pub const DEFAULT_SEND_RETRIES: u32 = 3;

/// sendMessage form body
#[derive(Debug, Serialize)]
pub(crate) struct SendMessagePayload<'a> {
    pub chat_id: &'a str,
    pub text: &'a str,
    pub parse_mode: &'a str,
}

/// Telegram Bot API client
///
/// Credentials are optional: sends fail fast with `ServiceUnavailable`
/// and no network traffic when either is missing.
pub struct TelegramClient {
    client: reqwest::Client,
    base_url: String,
    bot_token: Option<String>,
    chat_id: Option<String>,
}

impl TelegramClient {
    /// Create a new Telegram client
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            base_url: config.telegram_api_url.clone(),
            bot_token: config
                .telegram_bot_token
                .clone()
                .filter(|s| !s.is_empty()),
            chat_id: config.telegram_chat_id.clone().filter(|s| !s.is_empty()),
        }
    }

    /// Check if both bot token and chat id are configured
    pub fn is_configured(&self) -> bool {
        self.bot_token.is_some() && self.chat_id.is_some()
    }

    /// Send a message to the configured chat
    ///
    /// The payload is form-encoded with `parse_mode=HTML`, matching what
    /// the Bot API expects from the notification formatters.
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub async fn send_message(&self, text: &str) -> AppResult<()> {
        let (bot_token, chat_id) = self.credentials()?;

        // The URL embeds the bot token, so it is never logged
        let url = format!("{}/bot{}/sendMessage", self.base_url, bot_token);
        let payload = SendMessagePayload {
            chat_id,
            text,
            parse_mode: "HTML",
        };

        debug!("Sending message to Telegram");

        let response = match self.client.post(&url).form(&payload).send().await {
            Ok(response) => response,
            Err(e) => {
                metrics::record_notify_attempt("primary", "failure");
                error!(error = %e, "Error sending message to Telegram");
                return Err(e.into());
            }
        };

        let status = response.status();
        debug!(status = %status, "Telegram sendMessage response status");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            metrics::record_notify_attempt("primary", "failure");
            error!(status = %status, body = %body, "Failed to send message to Telegram");
            return Err(AppError::UpstreamError(format!(
                "Telegram API error {}: {}",
                status, body
            )));
        }

        metrics::record_notify_attempt("primary", "success");
        info!("Message sent to Telegram successfully");
        Ok(())
    }

    /// Send with immediate sequential retries
    ///
    /// No backoff between attempts. Returns `true` on the first success.
    /// A missing configuration is terminal, not retried.
    #[instrument(skip(self, text), fields(text_len = text.len(), max_retries))]
    pub async fn send_message_with_retry(&self, text: &str, max_retries: u32) -> bool {
        for attempt in 1..=max_retries {
            match self.send_message(text).await {
                Ok(()) => return true,
                Err(e) if e.is_unconfigured() => {
                    error!(error = %e, "Telegram is not configured, not retrying");
                    return false;
                }
                Err(e) => {
                    warn!(attempt, max_retries, error = %e, "Telegram send attempt failed");
                }
            }
        }

        error!(max_retries, "Failed to send Telegram message after all attempts");
        false
    }

    /// Send the contact form notification
    pub async fn send_contact_form_notification(&self, form: &ContactForm) -> AppResult<()> {
        self.send_message(&format::contact_form_notification(form))
            .await
    }

    /// Send the tech spec notification
    pub async fn send_tech_spec_notification(&self, spec: &TechSpecSubmission) -> AppResult<()> {
        self.send_message(&format::tech_spec_notification(spec))
            .await
    }

    fn credentials(&self) -> AppResult<(&str, &str)> {
        match (self.bot_token.as_deref(), self.chat_id.as_deref()) {
            (Some(token), Some(chat)) => Ok((token, chat)),
            _ => Err(AppError::ServiceUnavailable(
                "TELEGRAM_BOT_TOKEN or TELEGRAM_CHAT_ID is not configured".to_string(),
            )),
        }
    }
}
