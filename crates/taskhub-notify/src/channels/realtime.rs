//! Real-time push channel adapter.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use taskhub_core::error::ErrorKind;
use taskhub_core::result::AppResult;
use taskhub_core::types::id::UserId;
use taskhub_entity::notification::{DeliveryMethod, Notification};

use super::{ChannelAdapter, DeliveryOutcome};

/// Result of handing a notification to the realtime push layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    /// The recipient had an active connection and the push was accepted.
    Accepted,
    /// The recipient has no active connection.
    RecipientOffline,
}

/// Transport seam for the realtime push layer (WebSocket hub or similar).
#[async_trait]
pub trait RealtimeBroadcaster: Send + Sync + 'static {
    /// Push the notification to the user's active connections.
    async fn broadcast(&self, notification: &Notification, user_id: UserId)
    -> AppResult<PushOutcome>;
}

/// Channel adapter for real-time push delivery.
///
/// An offline recipient is a degraded, non-fatal outcome: it is recorded
/// as a failed attempt and marked transient, so the single policy retry
/// still applies in case the user reconnects.
#[derive(Clone)]
pub struct RealtimeAdapter {
    broadcaster: Arc<dyn RealtimeBroadcaster>,
}

impl RealtimeAdapter {
    /// Creates a new realtime adapter over the given broadcaster.
    pub fn new(broadcaster: Arc<dyn RealtimeBroadcaster>) -> Self {
        Self { broadcaster }
    }
}

#[async_trait]
impl ChannelAdapter for RealtimeAdapter {
    fn method(&self) -> DeliveryMethod {
        DeliveryMethod::Realtime
    }

    async fn deliver(&self, notification: &Notification, target: UserId) -> DeliveryOutcome {
        match self.broadcaster.broadcast(notification, target).await {
            Ok(PushOutcome::Accepted) => DeliveryOutcome::Delivered,
            Ok(PushOutcome::RecipientOffline) => {
                debug!(user_id = %target, notification_id = %notification.id, "Recipient offline, push not delivered");
                DeliveryOutcome::Failed {
                    reason: "recipient offline".to_string(),
                    transient: true,
                }
            }
            Err(e) => DeliveryOutcome::Failed {
                transient: e.kind == ErrorKind::Unavailable,
                reason: e.to_string(),
            },
        }
    }
}
