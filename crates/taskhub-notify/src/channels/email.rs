//! Email channel adapter.

use std::sync::Arc;

use async_trait::async_trait;

use taskhub_core::error::ErrorKind;
use taskhub_core::result::AppResult;
use taskhub_core::types::id::UserId;
use taskhub_entity::notification::{DeliveryMethod, Notification};

use super::{ChannelAdapter, DeliveryOutcome};

/// Transport seam for the external email service.
#[async_trait]
pub trait EmailTransport: Send + Sync + 'static {
    /// Send the notification as an email to the user's address.
    async fn send(&self, notification: &Notification, user_id: UserId) -> AppResult<()>;
}

/// Channel adapter for email delivery.
///
/// Any transport error is a failure eligible for retry; errors of kind
/// `Unavailable` are treated as transient and back off before the retry.
#[derive(Clone)]
pub struct EmailAdapter {
    transport: Arc<dyn EmailTransport>,
}

impl EmailAdapter {
    /// Creates a new email adapter over the given transport.
    pub fn new(transport: Arc<dyn EmailTransport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl ChannelAdapter for EmailAdapter {
    fn method(&self) -> DeliveryMethod {
        DeliveryMethod::Email
    }

    async fn deliver(&self, notification: &Notification, target: UserId) -> DeliveryOutcome {
        match self.transport.send(notification, target).await {
            Ok(()) => DeliveryOutcome::Delivered,
            Err(e) => DeliveryOutcome::Failed {
                transient: e.kind == ErrorKind::Unavailable,
                reason: e.to_string(),
            },
        }
    }
}
