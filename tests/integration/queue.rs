//! Notification queue integration tests
//!
//! Tests for the background retry queue: immediate delivery, retry passes
//! after the interval, dropping messages once the budget is spent, and
//! holding messages while Telegram is unconfigured.

use std::sync::Arc;
use std::time::Duration;

use herald::{NotifyQueue, NotifyQueueConfig, TelegramClient};

use crate::common::{self, constants};
use crate::mocks::telegram::MockTelegram;

fn queue_config() -> NotifyQueueConfig {
    NotifyQueueConfig {
        max_retries: 3,
        retry_interval: Duration::from_millis(100),
        channel_buffer: 8,
    }
}

fn client_against(mock: &MockTelegram) -> Arc<TelegramClient> {
    let config = common::test_config(common::UNUSED_URL, &mock.uri());
    Arc::new(TelegramClient::new(reqwest::Client::new(), &config))
}

#[tokio::test]
async fn test_enqueued_message_is_delivered() {
    let mock = MockTelegram::start().await;
    mock.mock_send_message_ok(constants::TEST_BOT_TOKEN).await;

    let queue = NotifyQueue::new(client_against(&mock), queue_config());
    queue.enqueue("queued message".to_string());

    let requests = common::wait_for_telegram_requests(&mock, 1, Duration::from_secs(2)).await;
    assert_eq!(requests.len(), 1);
    assert!(common::form_body(&requests[0]).contains("queued"));
}

#[tokio::test]
async fn test_queue_delivers_multiple_messages() {
    let mock = MockTelegram::start().await;
    mock.mock_send_message_ok(constants::TEST_BOT_TOKEN).await;

    let queue = NotifyQueue::new(client_against(&mock), queue_config());
    queue.enqueue("first".to_string());
    queue.enqueue("second".to_string());

    let requests = common::wait_for_telegram_requests(&mock, 2, Duration::from_secs(2)).await;
    assert_eq!(requests.len(), 2);

    let bodies: Vec<String> = requests.iter().map(common::form_body).collect();
    assert!(bodies.iter().any(|b| b.contains("text=first")));
    assert!(bodies.iter().any(|b| b.contains("text=second")));
}

#[tokio::test]
async fn test_queue_retries_failed_deliveries() {
    let mock = MockTelegram::start().await;
    mock.mock_send_message_failures_then_ok(constants::TEST_BOT_TOKEN, 1)
        .await;

    let queue = NotifyQueue::new(client_against(&mock), queue_config());
    queue.enqueue("flaky delivery".to_string());

    let requests = common::wait_for_telegram_requests(&mock, 2, Duration::from_secs(2)).await;
    assert_eq!(requests.len(), 2);

    // Delivered on the retry pass, nothing further is sent
    tokio::time::sleep(Duration::from_millis(250)).await;
    assert_eq!(mock.received_requests().await.len(), 2);
}

#[tokio::test]
async fn test_queue_drops_message_after_the_retry_budget() {
    let mock = MockTelegram::start().await;
    mock.mock_send_message_failure(constants::TEST_BOT_TOKEN, 500)
        .await;

    let config = NotifyQueueConfig {
        max_retries: 2,
        retry_interval: Duration::from_millis(50),
        channel_buffer: 8,
    };
    let queue = NotifyQueue::new(client_against(&mock), config);
    queue.enqueue("doomed".to_string());

    let requests = common::wait_for_telegram_requests(&mock, 2, Duration::from_secs(2)).await;
    assert_eq!(requests.len(), 2);

    // Budget spent: the message is dropped, not retried forever
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(mock.received_requests().await.len(), 2);
}

#[tokio::test]
async fn test_queue_holds_messages_while_unconfigured() {
    let mock = MockTelegram::start().await;
    mock.mock_send_message_ok(constants::TEST_BOT_TOKEN).await;

    let mut config = common::test_config(common::UNUSED_URL, &mock.uri());
    config.telegram_bot_token = None;
    let client = Arc::new(TelegramClient::new(reqwest::Client::new(), &config));

    let queue = NotifyQueue::new(client, queue_config());
    queue.enqueue("held back".to_string());

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert!(mock.received_requests().await.is_empty());
}
