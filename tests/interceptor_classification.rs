//! The interception chokepoint: every failed call produces exactly one
//! notification, classified by cause, and the caller only ever observes a
//! missing payload.

mod common;

use common::mock_backend::{MockBackend, MockResponse};
use std::sync::Arc;

use clusterdeck::api::ApiClient;
use clusterdeck::notify::{NotificationBuffer, Severity};

#[tokio::test]
async fn transport_failure_names_the_configured_base() {
    // Grab a port with nothing listening on it.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let notifications = Arc::new(NotificationBuffer::new(8));
    let api = ApiClient::new(base.clone(), notifications.clone());

    assert!(api.stats().get().await.is_none());

    let notes = notifications.snapshot();
    assert_eq!(notes.len(), 1);
    assert_eq!(
        notes[0].message,
        format!("backend unreachable, check configuration: {base}")
    );
    assert_eq!(notes[0].severity, Severity::Error);
}

#[tokio::test]
async fn error_body_passes_through_verbatim() {
    let mock = MockBackend::start().await;
    mock.respond("/stats", MockResponse::error(500, "X failed")).await;

    let notifications = Arc::new(NotificationBuffer::new(8));
    let api = ApiClient::new(mock.base_url(), notifications.clone());

    assert!(api.stats().get().await.is_none());

    let notes = notifications.snapshot();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].message, "X failed");
}

#[tokio::test]
async fn empty_error_body_falls_back_to_status_text() {
    let mock = MockBackend::start().await;
    mock.respond("/stats", MockResponse::empty_error(500)).await;

    let notifications = Arc::new(NotificationBuffer::new(8));
    let api = ApiClient::new(mock.base_url(), notifications.clone());

    assert!(api.stats().get().await.is_none());

    let notes = notifications.snapshot();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].message, "Internal Server Error");
}

#[tokio::test]
async fn repeated_failures_each_notify_again() {
    // No suppression window: identical failures are not de-duplicated.
    let mock = MockBackend::start().await;
    mock.respond("/stats", MockResponse::error(503, "down")).await;
    mock.respond("/stats", MockResponse::error(503, "down")).await;

    let notifications = Arc::new(NotificationBuffer::new(8));
    let api = ApiClient::new(mock.base_url(), notifications.clone());

    assert!(api.stats().get().await.is_none());
    assert!(api.stats().get().await.is_none());

    let notes = notifications.snapshot();
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0].message, "down");
    assert_eq!(notes[1].message, "down");
}

#[tokio::test]
async fn schema_mismatch_on_success_notifies_once() {
    let mock = MockBackend::start().await;
    mock.respond("/stats", MockResponse::json("[1, 2, 3]")).await;

    let notifications = Arc::new(NotificationBuffer::new(8));
    let api = ApiClient::new(mock.base_url(), notifications.clone());

    assert!(api.stats().get().await.is_none());

    let notes = notifications.snapshot();
    assert_eq!(notes.len(), 1);
    assert!(notes[0].message.contains("invalid payload"));
}

#[tokio::test]
async fn success_emits_no_notification() {
    let mock = MockBackend::start().await;
    mock.respond("/stats", MockResponse::json(r#"{"appCount": 1}"#)).await;

    let notifications = Arc::new(NotificationBuffer::new(8));
    let api = ApiClient::new(mock.base_url(), notifications.clone());

    let stats = api.stats().get().await.expect("stats should decode");
    assert_eq!(stats.app_count, 1);
    assert!(notifications.is_empty());
}
