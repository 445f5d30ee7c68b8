//! Durable notification storage abstraction.

pub mod memory;

pub use memory::MemoryNotificationStore;

use async_trait::async_trait;

use taskhub_core::result::AppResult;
use taskhub_core::types::id::{NotificationId, UserId};
use taskhub_entity::notification::{
    DeliveryAttempt, Notification, NotificationFilter, NotificationStatus,
};

/// Storage seam for notification records.
///
/// Mutating operations take the caller's `expected_version` and fail with
/// a `Conflict` error on mismatch; every successful mutation increments
/// the version and advances `updated_at`. Records are never physically
/// deleted by the engine.
#[async_trait]
pub trait NotificationStore: Send + Sync + 'static {
    /// Persist a freshly created record.
    async fn create(&self, notification: &Notification) -> AppResult<Notification>;

    /// Look up a record by id.
    async fn find_by_id(&self, id: NotificationId) -> AppResult<Option<Notification>>;

    /// List a user's records matching the filter, most recent first.
    ///
    /// Returns the page of items and the total match count across pages.
    async fn find_by_filter(
        &self,
        user_id: UserId,
        filter: &NotificationFilter,
    ) -> AppResult<(Vec<Notification>, u64)>;

    /// Append delivery attempts to a record's audit trail.
    async fn append_attempts(
        &self,
        id: NotificationId,
        expected_version: u64,
        attempts: &[DeliveryAttempt],
    ) -> AppResult<Notification>;

    /// Transition a record's read status.
    async fn update_status(
        &self,
        id: NotificationId,
        expected_version: u64,
        status: NotificationStatus,
    ) -> AppResult<Notification>;

    /// Mark all of a user's unread records read. Returns the count updated.
    async fn mark_all_read(&self, user_id: UserId) -> AppResult<u64>;
}
