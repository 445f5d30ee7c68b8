//! In-memory notification store using a Tokio mutex for single-node
//! deployments and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use taskhub_core::error::AppError;
use taskhub_core::result::AppResult;
use taskhub_core::types::id::{NotificationId, UserId};
use taskhub_entity::notification::{
    DeliveryAttempt, Notification, NotificationFilter, NotificationStatus,
};

use super::NotificationStore;

/// In-memory notification store.
///
/// Suitable for single-node deployments only.
#[derive(Debug, Default)]
pub struct MemoryNotificationStore {
    /// Protected record map.
    records: Mutex<HashMap<NotificationId, Notification>>,
}

impl MemoryNotificationStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NotificationStore for MemoryNotificationStore {
    async fn create(&self, notification: &Notification) -> AppResult<Notification> {
        let mut records = self.records.lock().await;
        if records.contains_key(&notification.id) {
            return Err(AppError::conflict(format!(
                "Notification {} already exists",
                notification.id
            )));
        }
        records.insert(notification.id, notification.clone());
        Ok(notification.clone())
    }

    async fn find_by_id(&self, id: NotificationId) -> AppResult<Option<Notification>> {
        let records = self.records.lock().await;
        Ok(records.get(&id).cloned())
    }

    async fn find_by_filter(
        &self,
        user_id: UserId,
        filter: &NotificationFilter,
    ) -> AppResult<(Vec<Notification>, u64)> {
        let records = self.records.lock().await;

        let mut matching: Vec<Notification> = records
            .values()
            .filter(|n| n.user_id == user_id && filter.matches(n))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(filter.page.offset() as usize)
            .take(filter.page.limit() as usize)
            .collect();

        Ok((items, total))
    }

    async fn append_attempts(
        &self,
        id: NotificationId,
        expected_version: u64,
        attempts: &[DeliveryAttempt],
    ) -> AppResult<Notification> {
        let mut records = self.records.lock().await;
        let record = records
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Notification {id} not found")))?;

        if record.version != expected_version {
            return Err(AppError::conflict(format!(
                "Notification {id} version is {}, expected {expected_version}",
                record.version
            )));
        }

        record.delivery_attempts.extend_from_slice(attempts);
        record.version += 1;
        record.updated_at = Utc::now();
        Ok(record.clone())
    }

    async fn update_status(
        &self,
        id: NotificationId,
        expected_version: u64,
        status: NotificationStatus,
    ) -> AppResult<Notification> {
        let mut records = self.records.lock().await;
        let record = records
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Notification {id} not found")))?;

        if record.version != expected_version {
            return Err(AppError::conflict(format!(
                "Notification {id} version is {}, expected {expected_version}",
                record.version
            )));
        }
        if !record.status.can_transition_to(status) {
            return Err(AppError::validation(format!(
                "Illegal status transition {} -> {status}",
                record.status
            )));
        }

        record.status = status;
        if status == NotificationStatus::Read {
            record.read_at = Some(Utc::now());
        }
        record.version += 1;
        record.updated_at = Utc::now();
        Ok(record.clone())
    }

    async fn mark_all_read(&self, user_id: UserId) -> AppResult<u64> {
        let mut records = self.records.lock().await;
        let now = Utc::now();
        let mut updated = 0;

        for record in records.values_mut() {
            if record.user_id == user_id && record.is_unread() {
                record.status = NotificationStatus::Read;
                record.read_at = Some(now);
                record.version += 1;
                record.updated_at = now;
                updated += 1;
            }
        }

        Ok(updated)
    }
}
