//! Notification retry queue
//!
//! Fire-and-forget queueing for notifications that must not block request
//! handling. A background worker attempts delivery on arrival and re-tries
//! failed messages on a fixed interval, dropping each one after its retry
//! budget is spent.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::{metrics, telegram::TelegramClient};

/// Configuration for the notification queue
#[derive(Debug, Clone)]
pub struct NotifyQueueConfig {
    /// Delivery attempts per message before it is dropped
    pub max_retries: u32,
    /// Minimum time between send passes
    pub retry_interval: Duration,
    /// Channel buffer size for handling submission bursts
    pub channel_buffer: usize,
}

impl Default for NotifyQueueConfig {
    fn default() -> Self {
        Self {
            max_retries: 5,
            retry_interval: Duration::from_secs(60),
            channel_buffer: 100,
        }
    }
}

/// Notification retry queue
///
/// `enqueue` never blocks and never fails; delivery outcomes surface only
/// in logs and metrics.
pub struct NotifyQueue {
    sender: mpsc::Sender<String>,
}

impl NotifyQueue {
    /// Create a new queue
    ///
    /// Spawns a background task that owns the pending messages.
    pub fn new(client: Arc<TelegramClient>, config: NotifyQueueConfig) -> Self {
        let (sender, receiver) = mpsc::channel(config.channel_buffer);

        // Spawn background worker
        tokio::spawn(Self::background_worker(client, receiver, config));

        Self { sender }
    }

    /// Create with default configuration
    pub fn with_defaults(client: Arc<TelegramClient>) -> Self {
        Self::new(client, NotifyQueueConfig::default())
    }

    /// Queue a notification - fire-and-forget
    ///
    /// If the channel is full the message is dropped and logged.
    pub fn enqueue(&self, text: String) {
        if let Err(e) = self.sender.try_send(text) {
            match e {
                mpsc::error::TrySendError::Full(_) => {
                    metrics::record_notify_dropped();
                    warn!("Notification queue channel full, dropping message");
                }
                mpsc::error::TrySendError::Closed(_) => {
                    metrics::record_notify_dropped();
                    error!("Notification queue channel closed, dropping message");
                }
            }
        }
    }

    /// Background worker that delivers pending notifications
    async fn background_worker(
        client: Arc<TelegramClient>,
        mut receiver: mpsc::Receiver<String>,
        config: NotifyQueueConfig,
    ) {
        info!(
            max_retries = config.max_retries,
            retry_interval_s = config.retry_interval.as_secs(),
            "Starting notification queue worker"
        );

        // Pending messages with their attempt counts
        let mut pending: Vec<(String, u32)> = Vec::new();
        let mut last_pass: Option<Instant> = None;

        loop {
            let time_until_pass = match last_pass {
                Some(at) => config.retry_interval.saturating_sub(at.elapsed()),
                None => Duration::ZERO,
            };

            tokio::select! {
                maybe_text = receiver.recv() => {
                    match maybe_text {
                        Some(text) => {
                            pending.push((text, 0));
                            metrics::set_notify_queue_depth(pending.len() as f64);
                            info!(queue_size = pending.len(), "Added message to notification queue");

                            // Attempt right away unless a pass ran within the interval
                            let due = last_pass
                                .map_or(true, |at| at.elapsed() >= config.retry_interval);
                            if due {
                                Self::run_pass(&client, &mut pending, &config).await;
                                last_pass = Some(Instant::now());
                            }
                        }
                        None => {
                            // Channel closed, one final pass and exit
                            if !pending.is_empty() {
                                Self::run_pass(&client, &mut pending, &config).await;
                            }
                            info!("Notification queue shutting down");
                            break;
                        }
                    }
                }
                _ = tokio::time::sleep(time_until_pass), if !pending.is_empty() => {
                    Self::run_pass(&client, &mut pending, &config).await;
                    last_pass = Some(Instant::now());
                }
            }
        }
    }

    /// One delivery pass over the pending messages
    async fn run_pass(
        client: &Arc<TelegramClient>,
        pending: &mut Vec<(String, u32)>,
        config: &NotifyQueueConfig,
    ) {
        if pending.is_empty() {
            return;
        }

        if !client.is_configured() {
            warn!("Cannot process notification queue: Telegram is not configured");
            return;
        }

        let mut remaining = Vec::new();
        for (text, attempts) in pending.drain(..) {
            if attempts >= config.max_retries {
                metrics::record_notify_dropped();
                error!(
                    attempts,
                    "Failed to send notification after all attempts, dropping message"
                );
                continue;
            }

            match client.send_message(&text).await {
                Ok(()) => {
                    info!("Successfully sent queued notification");
                }
                Err(e) => {
                    warn!(
                        attempt = attempts + 1,
                        max_retries = config.max_retries,
                        error = %e,
                        "Failed to send queued notification, will retry later"
                    );
                    remaining.push((text, attempts + 1));
                }
            }
        }

        *pending = remaining;
        metrics::set_notify_queue_depth(pending.len() as f64);

        if !pending.is_empty() {
            info!(
                queue_size = pending.len(),
                "Notification queue has remaining messages"
            );
        }
    }
}
