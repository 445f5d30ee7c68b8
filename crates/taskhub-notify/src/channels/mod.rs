//! Delivery channel adapters.
//!
//! Each adapter wraps one transport behind the single [`ChannelAdapter`]
//! capability the retry coordinator drives. Transports themselves are
//! trait seams implemented outside the engine.

pub mod email;
pub mod realtime;

pub use email::{EmailAdapter, EmailTransport};
pub use realtime::{PushOutcome, RealtimeAdapter, RealtimeBroadcaster};

use async_trait::async_trait;

use taskhub_core::types::id::UserId;
use taskhub_entity::notification::{DeliveryMethod, Notification};

/// Outcome of a single channel send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The transport accepted the notification.
    Delivered,
    /// The send did not go through. Transient failures back off briefly
    /// before the policy retry; others retry immediately.
    Failed {
        /// Human-readable failure reason, recorded in the audit trail.
        reason: String,
        /// Whether the condition is expected to clear on its own.
        transient: bool,
    },
}

/// A polymorphic sender for one transport.
#[async_trait]
pub trait ChannelAdapter: Send + Sync + 'static {
    /// The channel this adapter serves.
    fn method(&self) -> DeliveryMethod;

    /// Attempt to deliver the notification to the target user.
    ///
    /// Adapters report failure through [`DeliveryOutcome::Failed`] rather
    /// than an error; the retry coordinator owns the retry decision.
    async fn deliver(&self, notification: &Notification, target: UserId) -> DeliveryOutcome;
}
