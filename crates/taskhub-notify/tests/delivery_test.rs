//! End-to-end delivery fan-out tests over in-memory implementations.

mod common;

use std::sync::atomic::Ordering;

use taskhub_core::error::ErrorKind;
use taskhub_core::types::id::UserId;
use taskhub_entity::notification::{DeliveryMethod, NotificationStatus};

use common::{StubBroadcaster, StubEmailTransport, draft, engine};

#[tokio::test]
async fn test_create_with_both_channels_succeeding() {
    let engine = engine(StubBroadcaster::online(), StubEmailTransport::reliable());
    let user = UserId::new();

    let notification = engine
        .delivery
        .create_notification(draft(
            user,
            vec![DeliveryMethod::Realtime, DeliveryMethod::Email],
        ))
        .await
        .expect("create");

    assert_eq!(notification.status, NotificationStatus::Unread);
    assert_eq!(notification.version, 2);
    assert_eq!(notification.delivery_attempts.len(), 2);
    assert!(notification.delivery_attempts.iter().all(|a| a.success));
    assert_eq!(notification.channel_outcome(DeliveryMethod::Realtime), Some(true));
    assert_eq!(notification.channel_outcome(DeliveryMethod::Email), Some(true));
    assert_eq!(engine.broadcaster.accepted.load(Ordering::SeqCst), 1);
    assert_eq!(engine.email.sent.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_realtime_failure_then_success_on_retry() {
    let engine = engine(StubBroadcaster::failing_times(1), StubEmailTransport::reliable());
    let user = UserId::new();

    let notification = engine
        .delivery
        .create_notification(draft(user, vec![DeliveryMethod::Realtime]))
        .await
        .expect("create");

    let attempts = notification.attempts_for(DeliveryMethod::Realtime);
    assert_eq!(attempts.len(), 2);
    assert!(!attempts[0].success);
    assert!(attempts[1].success);
    assert_eq!(notification.channel_outcome(DeliveryMethod::Realtime), Some(true));
}

#[tokio::test]
async fn test_channel_exhaustion_does_not_fail_creation() {
    // Email fails on every attempt; realtime succeeds.
    let engine = engine(StubBroadcaster::online(), StubEmailTransport::failing_times(10));
    let user = UserId::new();

    let notification = engine
        .delivery
        .create_notification(draft(
            user,
            vec![DeliveryMethod::Realtime, DeliveryMethod::Email],
        ))
        .await
        .expect("creation succeeds despite channel failure");

    assert_eq!(notification.channel_outcome(DeliveryMethod::Realtime), Some(true));
    assert_eq!(notification.channel_outcome(DeliveryMethod::Email), Some(false));

    let email_attempts = notification.attempts_for(DeliveryMethod::Email);
    assert_eq!(email_attempts.len(), 2);
    assert!(
        email_attempts
            .last()
            .expect("attempts")
            .error_detail
            .is_some()
    );
}

#[tokio::test]
async fn test_offline_recipient_is_recorded_not_raised() {
    let engine = engine(StubBroadcaster::offline(), StubEmailTransport::reliable());
    let user = UserId::new();

    let notification = engine
        .delivery
        .create_notification(draft(user, vec![DeliveryMethod::Realtime]))
        .await
        .expect("create");

    let attempts = notification.attempts_for(DeliveryMethod::Realtime);
    assert!(!attempts.is_empty());
    assert!(
        attempts
            .iter()
            .all(|a| a.error_detail.as_deref() == Some("recipient offline"))
    );
    assert_eq!(notification.status, NotificationStatus::Unread);
}

#[tokio::test]
async fn test_duplicate_methods_are_collapsed() {
    let engine = engine(StubBroadcaster::online(), StubEmailTransport::reliable());
    let user = UserId::new();

    let notification = engine
        .delivery
        .create_notification(draft(
            user,
            vec![DeliveryMethod::Email, DeliveryMethod::Email],
        ))
        .await
        .expect("create");

    assert_eq!(notification.delivery_methods, vec![DeliveryMethod::Email]);
    assert_eq!(notification.delivery_attempts.len(), 1);
    assert_eq!(engine.email.sent.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_validation_rejects_before_any_side_effect() {
    let engine = engine(StubBroadcaster::online(), StubEmailTransport::reliable());
    let user = UserId::new();

    let mut bad = draft(user, vec![DeliveryMethod::Realtime]);
    bad.title = "  ".to_string();
    let err = engine
        .delivery
        .create_notification(bad)
        .await
        .expect_err("empty title");
    assert_eq!(err.kind, ErrorKind::Validation);

    let err = engine
        .delivery
        .create_notification(draft(user, vec![]))
        .await
        .expect_err("no methods");
    assert_eq!(err.kind, ErrorKind::Validation);

    // Nothing was persisted or sent.
    let page = engine
        .query
        .list_notifications(user, Default::default())
        .await
        .expect("list");
    assert_eq!(page.notifications.total_items, 0);
    assert_eq!(engine.broadcaster.accepted.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_delivery_latency_is_recorded() {
    let engine = engine(StubBroadcaster::online(), StubEmailTransport::reliable());
    let user = UserId::new();

    for _ in 0..3 {
        engine
            .delivery
            .create_notification(draft(user, vec![DeliveryMethod::Realtime]))
            .await
            .expect("create");
    }

    let report = engine.query.delivery_metrics();
    assert_eq!(report.count, 3);
    assert!(report.average_ms >= 0.0);
}
