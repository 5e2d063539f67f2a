//! Herald - chat and notification services with resilient delivery
//!
//! This library provides the outbound helpers behind the site: an assistant
//! chat responder with model fallback and canned localized replies, blog
//! content generation, and Telegram notification delivery with a direct-IP
//! fallback path and a background retry queue.

pub mod chat;
pub mod config;
pub mod content;
pub mod error;
pub mod language;
pub mod metrics;
pub mod openai;
pub mod telegram;

use std::sync::Arc;

pub use crate::chat::{fallback_reply, ChatResponder};
pub use crate::config::Config;
pub use crate::content::{BlogContent, ContentGenerator};
pub use crate::error::{AppError, AppResult};
pub use crate::language::Language;
pub use crate::openai::OpenAIClient;
pub use crate::telegram::{
    ContactForm, DirectSender, DirectSenderConfig, NotifyQueue, NotifyQueueConfig,
    TechSpecSubmission, TelegramClient,
};

/// Service helpers shared across the embedding application
pub struct Services {
    pub config: Config,
    pub http_client: reqwest::Client,
    pub openai_client: Arc<OpenAIClient>,
    pub chat: ChatResponder,
    pub content: ContentGenerator,
    pub telegram: Arc<TelegramClient>,
    pub direct_sender: DirectSender,
    /// Fire-and-forget queue for notifications that must not block a request
    pub notify_queue: NotifyQueue,
}

impl Services {
    /// Create the full service set
    pub async fn new(config: Config) -> AppResult<Self> {
        // Shared HTTP client with connection pooling and verified TLS.
        // The direct-IP sender builds its own client with different rules.
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(100)
            .timeout(std::time::Duration::from_secs(300))
            .build()?;

        // OpenAI side
        let openai_client = Arc::new(OpenAIClient::new(http_client.clone(), &config));
        let chat = ChatResponder::new(openai_client.clone(), &config);
        let content = ContentGenerator::new(openai_client.clone());

        // Telegram side
        let telegram = Arc::new(TelegramClient::new(http_client.clone(), &config));
        let direct_sender = DirectSender::new(&config)?;
        let notify_queue = NotifyQueue::with_defaults(telegram.clone());

        Ok(Self {
            config,
            http_client,
            openai_client,
            chat,
            content,
            telegram,
            direct_sender,
            notify_queue,
        })
    }
}
