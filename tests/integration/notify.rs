//! Telegram notification integration tests
//!
//! Tests for the hostname-path client (form payload, retry wrapper) and
//! the direct-IP sender (endpoint rotation, round backoff, Host header).

use std::time::Duration;

use herald::telegram::DEFAULT_SEND_RETRIES;
use herald::{ContactForm, DirectSender, DirectSenderConfig, TelegramClient};

use crate::common::{self, constants};
use crate::mocks::telegram::MockTelegram;

fn client_against(mock: &MockTelegram) -> TelegramClient {
    let config = common::test_config(common::UNUSED_URL, &mock.uri());
    TelegramClient::new(reqwest::Client::new(), &config)
}

#[tokio::test]
async fn test_send_message_posts_html_form_payload() {
    let mock = MockTelegram::start().await;
    mock.mock_send_message_ok(constants::TEST_BOT_TOKEN).await;

    let client = client_against(&mock);
    client.send_message("hello").await.unwrap();

    let requests = mock.send_message_requests(constants::TEST_BOT_TOKEN).await;
    assert_eq!(requests.len(), 1);

    let body = common::form_body(&requests[0]);
    assert!(body.contains(&format!("chat_id={}", constants::TEST_CHAT_ID)));
    assert!(body.contains("text=hello"));
    assert!(body.contains("parse_mode=HTML"));
}

#[tokio::test]
async fn test_send_message_without_credentials_fails_fast() {
    let mock = MockTelegram::start().await;
    mock.mock_send_message_ok(constants::TEST_BOT_TOKEN).await;

    let mut config = common::test_config(common::UNUSED_URL, &mock.uri());
    config.telegram_chat_id = None;
    let client = TelegramClient::new(reqwest::Client::new(), &config);

    let result = client.send_message("hello").await;

    assert!(result.unwrap_err().is_unconfigured());
    assert!(mock.received_requests().await.is_empty());
}

#[tokio::test]
async fn test_empty_token_counts_as_unconfigured() {
    let mock = MockTelegram::start().await;
    mock.mock_send_message_ok(constants::TEST_BOT_TOKEN).await;

    let mut config = common::test_config(common::UNUSED_URL, &mock.uri());
    config.telegram_bot_token = Some(String::new());
    let client = TelegramClient::new(reqwest::Client::new(), &config);

    let result = client.send_message("hello").await;

    assert!(result.unwrap_err().is_unconfigured());
    assert!(mock.received_requests().await.is_empty());
}

#[tokio::test]
async fn test_retry_recovers_from_transient_failures() {
    let mock = MockTelegram::start().await;
    mock.mock_send_message_failures_then_ok(constants::TEST_BOT_TOKEN, 2)
        .await;

    let client = client_against(&mock);
    let sent = client
        .send_message_with_retry("hello", DEFAULT_SEND_RETRIES)
        .await;

    assert!(sent);
    assert_eq!(mock.received_requests().await.len(), 3);
}

#[tokio::test]
async fn test_retry_gives_up_after_the_attempt_budget() {
    let mock = MockTelegram::start().await;
    mock.mock_send_message_failure(constants::TEST_BOT_TOKEN, 500)
        .await;

    let client = client_against(&mock);
    let sent = client.send_message_with_retry("hello", 3).await;

    assert!(!sent);
    assert_eq!(mock.received_requests().await.len(), 3);
}

#[tokio::test]
async fn test_retry_does_not_loop_when_unconfigured() {
    let mock = MockTelegram::start().await;

    let mut config = common::test_config(common::UNUSED_URL, &mock.uri());
    config.telegram_bot_token = None;
    let client = TelegramClient::new(reqwest::Client::new(), &config);

    let sent = client.send_message_with_retry("hello", 5).await;

    assert!(!sent);
    assert!(mock.received_requests().await.is_empty());
}

#[tokio::test]
async fn test_contact_form_notification_reaches_the_chat() {
    let mock = MockTelegram::start().await;
    mock.mock_send_message_ok(constants::TEST_BOT_TOKEN).await;

    let client = client_against(&mock);
    let form = ContactForm {
        name: Some("Ada".to_string()),
        email: Some("ada@example.com".to_string()),
        message: Some("Interested in a demo".to_string()),
    };
    client.send_contact_form_notification(&form).await.unwrap();

    let requests = mock.send_message_requests(constants::TEST_BOT_TOKEN).await;
    assert_eq!(requests.len(), 1);
    assert!(common::form_body(&requests[0]).contains("Ada"));
}

#[tokio::test]
async fn test_direct_sender_walks_the_endpoint_list() {
    let first = MockTelegram::start().await;
    let second = MockTelegram::start().await;
    let third = MockTelegram::start().await;
    first
        .mock_direct_send_failure(constants::TEST_BOT_TOKEN, 500)
        .await;
    second
        .mock_direct_send_failure(constants::TEST_BOT_TOKEN, 502)
        .await;
    third.mock_direct_send_ok(constants::TEST_BOT_TOKEN).await;

    let config = common::test_config(common::UNUSED_URL, common::UNUSED_URL);
    let sender_config = DirectSenderConfig {
        endpoints: vec![first.uri(), second.uri(), third.uri()],
        max_rounds: 3,
        base_delay: Duration::from_millis(10),
    };
    let sender = DirectSender::with_config(&config, sender_config).unwrap();

    assert!(sender.send("direct delivery").await);

    // One attempt per endpoint, stop at the first success
    assert_eq!(first.received_requests().await.len(), 1);
    assert_eq!(second.received_requests().await.len(), 1);
    let requests = third.received_requests().await;
    assert_eq!(requests.len(), 1);

    // The IP path must present the real hostname
    let host = requests[0].headers.get("host").and_then(|v| v.to_str().ok());
    assert_eq!(host, Some("api.telegram.org"));
}

#[tokio::test]
async fn test_direct_sender_exhausts_rounds_then_gives_up() {
    let first = MockTelegram::start().await;
    let second = MockTelegram::start().await;
    first
        .mock_direct_send_failure(constants::TEST_BOT_TOKEN, 500)
        .await;
    second
        .mock_direct_send_failure(constants::TEST_BOT_TOKEN, 500)
        .await;

    let config = common::test_config(common::UNUSED_URL, common::UNUSED_URL);
    let sender_config = DirectSenderConfig {
        endpoints: vec![first.uri(), second.uri()],
        max_rounds: 3,
        base_delay: Duration::from_millis(10),
    };
    let sender = DirectSender::with_config(&config, sender_config).unwrap();

    let started = std::time::Instant::now();
    assert!(!sender.send("unreachable").await);

    // Inter-round waits of base * 2^0 and base * 2^1, none after the last round
    assert!(started.elapsed() >= Duration::from_millis(30));
    assert_eq!(first.received_requests().await.len(), 3);
    assert_eq!(second.received_requests().await.len(), 3);
}

#[tokio::test]
async fn test_direct_sender_without_credentials_sends_nothing() {
    let mock = MockTelegram::start().await;
    mock.mock_direct_send_ok(constants::TEST_BOT_TOKEN).await;

    let mut config = common::test_config(common::UNUSED_URL, common::UNUSED_URL);
    config.telegram_bot_token = None;
    let sender_config = DirectSenderConfig {
        endpoints: vec![mock.uri()],
        max_rounds: 3,
        base_delay: Duration::from_millis(10),
    };
    let sender = DirectSender::with_config(&config, sender_config).unwrap();

    assert!(!sender.send("never sent").await);
    assert!(mock.received_requests().await.is_empty());
}

#[tokio::test]
async fn test_direct_sender_without_chat_id_sends_nothing() {
    let mock = MockTelegram::start().await;
    mock.mock_direct_send_ok(constants::TEST_BOT_TOKEN).await;

    let mut config = common::test_config(common::UNUSED_URL, common::UNUSED_URL);
    config.telegram_chat_id = None;
    let sender_config = DirectSenderConfig {
        endpoints: vec![mock.uri()],
        max_rounds: 3,
        base_delay: Duration::from_millis(10),
    };
    let sender = DirectSender::with_config(&config, sender_config).unwrap();

    assert!(!sender.send("never sent").await);
    assert!(mock.received_requests().await.is_empty());
}
