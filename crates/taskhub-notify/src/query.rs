//! Query and read-status layer: filtered listing, pagination, and the
//! Unread→Read transition.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use taskhub_core::error::{AppError, ErrorKind};
use taskhub_core::result::AppResult;
use taskhub_core::types::id::{NotificationId, UserId};
use taskhub_core::types::pagination::PageResponse;
use taskhub_entity::notification::{Notification, NotificationFilter, NotificationStatus};

use crate::metrics::{DELIVERY_METRIC, DeliveryMetricsReport, MetricsSink};
use crate::store::NotificationStore;

/// How many version conflicts `mark_as_read` absorbs before giving up.
const MARK_READ_RETRIES: u32 = 3;

/// One page of a user's notifications plus delivery-performance aggregates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationPage {
    /// The matching notifications, most recent first.
    pub notifications: PageResponse<Notification>,
    /// Delivery latency aggregates from the metrics sink.
    pub metrics: DeliveryMetricsReport,
}

/// Read-side service over the notification store.
pub struct QueryService {
    /// Durable notification storage.
    store: Arc<dyn NotificationStore>,
    /// Delivery latency aggregates.
    metrics: Arc<dyn MetricsSink>,
}

impl QueryService {
    /// Creates a new query service.
    pub fn new(store: Arc<dyn NotificationStore>, metrics: Arc<dyn MetricsSink>) -> Self {
        Self { store, metrics }
    }

    /// List a user's notifications with filtering and pagination.
    pub async fn list_notifications(
        &self,
        user_id: UserId,
        filter: NotificationFilter,
    ) -> AppResult<NotificationPage> {
        let (items, total) = self.store.find_by_filter(user_id, &filter).await?;
        Ok(NotificationPage {
            notifications: PageResponse::new(items, filter.page.page, filter.page.limit(), total),
            metrics: self.metrics.report(DELIVERY_METRIC),
        })
    }

    /// Current delivery-performance aggregates.
    pub fn delivery_metrics(&self) -> DeliveryMetricsReport {
        self.metrics.report(DELIVERY_METRIC)
    }

    /// Mark a notification read.
    ///
    /// Idempotent: an already-read record is returned unchanged. A version
    /// conflict from a concurrent mutation is absorbed by re-reading and
    /// retrying a bounded number of times.
    pub async fn mark_as_read(&self, id: NotificationId) -> AppResult<Notification> {
        for _ in 0..MARK_READ_RETRIES {
            let Some(current) = self.store.find_by_id(id).await? else {
                return Err(AppError::not_found(format!("Notification {id} not found")));
            };
            if !current.is_unread() {
                return Ok(current);
            }

            match self
                .store
                .update_status(id, current.version, NotificationStatus::Read)
                .await
            {
                Ok(updated) => {
                    debug!(notification_id = %id, "Notification marked read");
                    return Ok(updated);
                }
                Err(e) if e.kind == ErrorKind::Conflict => {
                    debug!(notification_id = %id, "Version conflict marking read, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::conflict(format!(
            "Gave up marking notification {id} read after {MARK_READ_RETRIES} version conflicts"
        )))
    }

    /// Mark all of a user's unread notifications read.
    ///
    /// Returns the number of records updated; safe with zero matches.
    pub async fn mark_all_as_read(&self, user_id: UserId) -> AppResult<u64> {
        let updated = self.store.mark_all_read(user_id).await?;
        if updated > 0 {
            info!(%user_id, updated, "Marked all notifications read");
        }
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use async_trait::async_trait;

    use taskhub_entity::notification::{
        DeliveryAttempt, DeliveryMethod, NotificationDraft, NotificationKind, Priority,
    };

    use crate::metrics::MemoryMetricsSink;
    use crate::store::MemoryNotificationStore;

    use super::*;

    /// Store whose `update_status` reports a scripted number of version
    /// conflicts before delegating to the in-memory store.
    struct ContendedStore {
        inner: MemoryNotificationStore,
        conflicts_remaining: AtomicU32,
    }

    impl ContendedStore {
        fn conflicting_times(times: u32) -> Self {
            Self {
                inner: MemoryNotificationStore::new(),
                conflicts_remaining: AtomicU32::new(times),
            }
        }
    }

    #[async_trait]
    impl NotificationStore for ContendedStore {
        async fn create(&self, notification: &Notification) -> AppResult<Notification> {
            self.inner.create(notification).await
        }

        async fn find_by_id(&self, id: NotificationId) -> AppResult<Option<Notification>> {
            self.inner.find_by_id(id).await
        }

        async fn find_by_filter(
            &self,
            user_id: UserId,
            filter: &NotificationFilter,
        ) -> AppResult<(Vec<Notification>, u64)> {
            self.inner.find_by_filter(user_id, filter).await
        }

        async fn append_attempts(
            &self,
            id: NotificationId,
            expected_version: u64,
            attempts: &[DeliveryAttempt],
        ) -> AppResult<Notification> {
            self.inner.append_attempts(id, expected_version, attempts).await
        }

        async fn update_status(
            &self,
            id: NotificationId,
            expected_version: u64,
            status: NotificationStatus,
        ) -> AppResult<Notification> {
            if self
                .conflicts_remaining
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok()
            {
                return Err(AppError::conflict(format!(
                    "Notification {id} was updated concurrently"
                )));
            }
            self.inner.update_status(id, expected_version, status).await
        }

        async fn mark_all_read(&self, user_id: UserId) -> AppResult<u64> {
            self.inner.mark_all_read(user_id).await
        }
    }

    fn service(store: Arc<ContendedStore>) -> QueryService {
        QueryService::new(store, Arc::new(MemoryMetricsSink::new()))
    }

    fn notification() -> Notification {
        Notification::from_draft(NotificationDraft {
            user_id: UserId::new(),
            kind: NotificationKind::TaskComment,
            title: "t".to_string(),
            message: "m".to_string(),
            priority: Priority::Medium,
            delivery_methods: vec![DeliveryMethod::Realtime],
            metadata: None,
        })
    }

    #[tokio::test]
    async fn test_mark_as_read_absorbs_a_version_conflict() {
        let store = Arc::new(ContendedStore::conflicting_times(1));
        let n = notification();
        store.create(&n).await.expect("create");

        let updated = service(store).mark_as_read(n.id).await.expect("mark");
        assert_eq!(updated.status, NotificationStatus::Read);
        assert_eq!(updated.version, 2);
        assert!(updated.read_at.is_some());
    }

    #[tokio::test]
    async fn test_mark_as_read_gives_up_after_persistent_conflicts() {
        let store = Arc::new(ContendedStore::conflicting_times(u32::MAX));
        let n = notification();
        store.create(&n).await.expect("create");

        let err = service(store).mark_as_read(n.id).await.expect_err("give up");
        assert_eq!(err.kind, ErrorKind::Conflict);
    }
}
