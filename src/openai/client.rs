//! OpenAI API client
//!
//! HTTP client for the OpenAI chat-completion, image-generation and
//! model-list endpoints.

use tracing::{debug, error, instrument, warn};

use crate::{
    config::Config,
    error::{AppError, AppResult},
    openai::models::{
        ChatCompletionRequest, ChatCompletionResponse, ImageGenerationRequest,
        ImageGenerationResponse, ModelList,
    },
};

/// OpenAI API client
///
/// The API key is optional: calls return `ServiceUnavailable` without
/// touching the network when it is absent, and callers degrade from there.
pub struct OpenAIClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl OpenAIClient {
    /// Create a new OpenAI client
    ///
    /// An empty `OPENAI_API_KEY` counts as absent, like the Telegram
    /// credentials.
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            base_url: config.openai_api_url.clone(),
            api_key: config.openai_api_key.clone().filter(|s| !s.is_empty()),
        }
    }

    /// Check if the client is configured with an API key
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Length of the configured API key, 0 when absent. Safe to log.
    pub fn key_length(&self) -> usize {
        self.api_key.as_deref().map(str::len).unwrap_or(0)
    }

    /// Send a chat completion request
    #[instrument(skip(self, request), fields(model = %request.model))]
    pub async fn chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> AppResult<ChatCompletionResponse> {
        let api_key = self.require_key()?;
        let url = format!("{}/chat/completions", self.base_url);

        debug!(url = %url, messages = request.messages.len(), "Sending chat completion to OpenAI");

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        debug!(status = %status, "OpenAI chat completion response status");

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                warn!(status = %status, body = %text, "OpenAI rate limit hit");
                return Err(AppError::RateLimited(format!(
                    "OpenAI API error {}: {}",
                    status, text
                )));
            }

            error!(status = %status, body = %text, "OpenAI chat completion request failed");
            return Err(AppError::UpstreamError(format!(
                "OpenAI API error {}: {}",
                status, text
            )));
        }

        let body = response.text().await?;
        debug!(body = %body, "OpenAI chat completion response body");

        let result: ChatCompletionResponse = match serde_json::from_str(&body) {
            Ok(r) => r,
            Err(e) => {
                error!(error = %e, body = %body, "Failed to parse OpenAI chat completion response");
                return Err(AppError::UpstreamError(format!(
                    "Failed to parse OpenAI response: {}",
                    e
                )));
            }
        };

        debug!(choices = result.choices.len(), "Chat completion succeeded");
        Ok(result)
    }

    /// Generate an image
    #[instrument(skip(self, request), fields(model = %request.model))]
    pub async fn generate_image(
        &self,
        request: &ImageGenerationRequest,
    ) -> AppResult<ImageGenerationResponse> {
        let api_key = self.require_key()?;
        let url = format!("{}/images/generations", self.base_url);

        debug!(url = %url, prompt_len = request.prompt.len(), "Sending image generation to OpenAI");

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        debug!(status = %status, "OpenAI image generation response status");

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                warn!(status = %status, body = %text, "OpenAI rate limit hit");
                return Err(AppError::RateLimited(format!(
                    "OpenAI API error {}: {}",
                    status, text
                )));
            }

            error!(status = %status, body = %text, "OpenAI image generation request failed");
            return Err(AppError::UpstreamError(format!(
                "OpenAI API error {}: {}",
                status, text
            )));
        }

        let body = response.text().await?;

        let result: ImageGenerationResponse = match serde_json::from_str(&body) {
            Ok(r) => r,
            Err(e) => {
                error!(error = %e, body = %body, "Failed to parse OpenAI image generation response");
                return Err(AppError::UpstreamError(format!(
                    "Failed to parse OpenAI response: {}",
                    e
                )));
            }
        };

        debug!(images = result.data.len(), "Image generation succeeded");
        Ok(result)
    }

    /// List available models (connectivity probe)
    #[instrument(skip(self))]
    pub async fn list_models(&self) -> AppResult<ModelList> {
        let api_key = self.require_key()?;
        let url = format!("{}/models", self.base_url);

        debug!(url = %url, "Listing OpenAI models");

        let response = self.client.get(&url).bearer_auth(api_key).send().await?;

        let status = response.status();
        debug!(status = %status, "OpenAI model list response status");

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            error!(status = %status, body = %text, "OpenAI model list request failed");
            return Err(AppError::UpstreamError(format!(
                "OpenAI API error {}: {}",
                status, text
            )));
        }

        let body = response.text().await?;

        let result: ModelList = match serde_json::from_str(&body) {
            Ok(r) => r,
            Err(e) => {
                error!(error = %e, body = %body, "Failed to parse OpenAI model list response");
                return Err(AppError::UpstreamError(format!(
                    "Failed to parse OpenAI response: {}",
                    e
                )));
            }
        };

        debug!(models = result.data.len(), "Model list fetched");
        Ok(result)
    }

    fn require_key(&self) -> AppResult<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            AppError::ServiceUnavailable("OPENAI_API_KEY is not configured".to_string())
        })
    }
}
