//! Telegram notification module
//!
//! Primary hostname client, direct-IP fallback sender, message formatters
//! and the background retry queue.

pub mod client;
pub mod direct;
pub mod format;
pub mod queue;

pub use client::{TelegramClient, DEFAULT_SEND_RETRIES};
pub use direct::{round_delay, DirectSender, DirectSenderConfig};
pub use format::{
    contact_form_notification, tech_spec_notification, ContactForm, ContactInfo, SpecAnswer,
    TechSpecSubmission,
};
pub use queue::{NotifyQueue, NotifyQueueConfig};
