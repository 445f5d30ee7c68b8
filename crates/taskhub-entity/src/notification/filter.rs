//! Notification list filtering.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use taskhub_core::types::pagination::PageRequest;

use super::kind::NotificationKind;
use super::model::Notification;
use super::priority::Priority;
use super::status::NotificationStatus;

/// Filter and pagination parameters for listing a user's notifications.
///
/// Empty vectors mean "no constraint" on that dimension.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotificationFilter {
    /// Restrict to these read statuses.
    #[serde(default)]
    pub statuses: Vec<NotificationStatus>,
    /// Restrict to these kinds.
    #[serde(default)]
    pub kinds: Vec<NotificationKind>,
    /// Restrict to these priorities.
    #[serde(default)]
    pub priorities: Vec<Priority>,
    /// Only notifications created at or after this instant.
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    /// Only notifications created at or before this instant.
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    /// Pagination parameters.
    #[serde(default)]
    pub page: PageRequest,
}

impl NotificationFilter {
    /// Whether a notification satisfies every filter dimension.
    pub fn matches(&self, notification: &Notification) -> bool {
        if !self.statuses.is_empty() && !self.statuses.contains(&notification.status) {
            return false;
        }
        if !self.kinds.is_empty() && !self.kinds.contains(&notification.kind) {
            return false;
        }
        if !self.priorities.is_empty() && !self.priorities.contains(&notification.priority) {
            return false;
        }
        if let Some(start) = self.start_date
            && notification.created_at < start
        {
            return false;
        }
        if let Some(end) = self.end_date
            && notification.created_at > end
        {
            return false;
        }
        true
    }
}
