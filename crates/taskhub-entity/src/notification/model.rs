//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use taskhub_core::types::id::{NotificationId, UserId};

use super::attempt::DeliveryAttempt;
use super::channel::DeliveryMethod;
use super::kind::NotificationKind;
use super::priority::Priority;
use super::status::NotificationStatus;

/// A notification addressed to a user over one or more channels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    /// Unique notification identifier, assigned at creation.
    pub id: NotificationId,
    /// The recipient user.
    pub user_id: UserId,
    /// Notification category.
    pub kind: NotificationKind,
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub message: String,
    /// Priority level.
    pub priority: Priority,
    /// Requested delivery channels (distinct, non-empty).
    pub delivery_methods: Vec<DeliveryMethod>,
    /// Read status.
    pub status: NotificationStatus,
    /// Additional structured caller context (JSON).
    pub metadata: Option<serde_json::Value>,
    /// Append-only, per-channel chronological delivery audit trail.
    pub delivery_attempts: Vec<DeliveryAttempt>,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
    /// When the notification was last mutated.
    pub updated_at: DateTime<Utc>,
    /// When the notification was read.
    pub read_at: Option<DateTime<Utc>>,
    /// Optimistic-concurrency token; starts at 1 and increments on every
    /// persisted mutation.
    pub version: u64,
}

impl Notification {
    /// Materialize a draft into a fresh Unread, version-1 record with no
    /// delivery attempts.
    pub fn from_draft(draft: NotificationDraft) -> Self {
        let now = Utc::now();
        Self {
            id: NotificationId::new(),
            user_id: draft.user_id,
            kind: draft.kind,
            title: draft.title,
            message: draft.message,
            priority: draft.priority,
            delivery_methods: draft.delivery_methods,
            status: NotificationStatus::Unread,
            metadata: draft.metadata,
            delivery_attempts: Vec::new(),
            created_at: now,
            updated_at: now,
            read_at: None,
            version: 1,
        }
    }

    /// Check if the notification has not been read yet.
    pub fn is_unread(&self) -> bool {
        self.status == NotificationStatus::Unread
    }

    /// Final outcome of a channel: the `success` flag of its last recorded
    /// attempt, or `None` if the channel has no attempts.
    pub fn channel_outcome(&self, method: DeliveryMethod) -> Option<bool> {
        self.delivery_attempts
            .iter()
            .rev()
            .find(|a| a.method == method)
            .map(|a| a.success)
    }

    /// Attempts recorded for a single channel, in chronological order.
    pub fn attempts_for(&self, method: DeliveryMethod) -> Vec<&DeliveryAttempt> {
        self.delivery_attempts
            .iter()
            .filter(|a| a.method == method)
            .collect()
    }
}

/// Input for creating a notification.
///
/// Drafts carry already-validated plain data; HTTP-level validation is a
/// caller concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationDraft {
    /// The recipient user.
    pub user_id: UserId,
    /// Notification category.
    pub kind: NotificationKind,
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub message: String,
    /// Priority level (defaults to medium).
    #[serde(default)]
    pub priority: Priority,
    /// Requested delivery channels.
    pub delivery_methods: Vec<DeliveryMethod>,
    /// Additional structured caller context.
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}
