//! Assistant chat responder
//!
//! Turns a conversation into displayable reply text. Tries the primary
//! model, retries once on the fallback model with the identical payload,
//! and degrades to a canned localized reply when both attempts fail.
//! Callers always get text; errors never escape this module.

use std::sync::Arc;

use tracing::{error, info, instrument, warn};

use crate::{
    chat::fallback::fallback_reply,
    config::Config,
    error::{AppError, AppResult},
    language::Language,
    metrics,
    openai::{ChatCompletionRequest, ChatMessage, OpenAIClient},
};

/// Sampling temperature for assistant replies
const CHAT_TEMPERATURE: f32 = 0.7;
/// Reply length cap in tokens
const CHAT_MAX_TOKENS: u32 = 800;

/// Assistant chat responder
pub struct ChatResponder {
    client: Arc<OpenAIClient>,
    primary_model: String,
    fallback_model: String,
}

impl ChatResponder {
    /// Create a new chat responder
    pub fn new(client: Arc<OpenAIClient>, config: &Config) -> Self {
        Self {
            client,
            primary_model: config.openai_model.clone(),
            fallback_model: config.openai_model_fallback.clone(),
        }
    }

    /// Produce a reply for the conversation
    ///
    /// Exactly one attempt per model, no backoff. The fallback attempt
    /// reuses the identical message payload and sampling parameters.
    #[instrument(skip(self, messages), fields(language = %language, messages = messages.len()))]
    pub async fn respond(&self, messages: &[ChatMessage], language: Language) -> String {
        if !self.client.is_configured() {
            error!("OpenAI API key is not configured");
            return fallback_reply(language).to_string();
        }

        info!(
            key_length = self.client.key_length(),
            model = %self.primary_model,
            fallback = %self.fallback_model,
            "OpenAI API key configured, requesting chat completion"
        );

        match self.complete(&self.primary_model, messages).await {
            Ok(text) => {
                info!(model = %self.primary_model, "Chat reply served by primary model");
                text
            }
            Err(primary_error) => {
                warn!(
                    model = %self.primary_model,
                    error = %primary_error,
                    retry_model = %self.fallback_model,
                    "Primary model failed, retrying with fallback model"
                );

                match self.complete(&self.fallback_model, messages).await {
                    Ok(text) => {
                        info!(model = %self.fallback_model, "Chat reply served by fallback model");
                        text
                    }
                    Err(fallback_error) => {
                        error!(
                            model = %self.fallback_model,
                            error = %fallback_error,
                            "Both models failed, returning canned reply"
                        );
                        fallback_reply(language).to_string()
                    }
                }
            }
        }
    }

    /// One completion attempt against one model
    ///
    /// A response without usable content counts as a failure so it
    /// triggers the fallback-model retry like any transport error.
    async fn complete(&self, model: &str, messages: &[ChatMessage]) -> AppResult<String> {
        let request = ChatCompletionRequest {
            model: model.to_string(),
            messages: messages.to_vec(),
            temperature: Some(CHAT_TEMPERATURE),
            max_tokens: Some(CHAT_MAX_TOKENS),
            response_format: None,
        };

        let response = match self.client.chat_completion(&request).await {
            Ok(response) => response,
            Err(e) => {
                metrics::record_chat_completion(model, "failure");
                return Err(e);
            }
        };

        match response.first_content() {
            Some(text) => {
                metrics::record_chat_completion(model, "success");
                Ok(text.to_string())
            }
            None => {
                metrics::record_chat_completion(model, "failure");
                Err(AppError::UpstreamError(
                    "Chat completion returned no usable content".to_string(),
                ))
            }
        }
    }
}
