//! Notification read-status state machine.

use serde::{Deserialize, Serialize};

/// Read status of a notification.
///
/// The only transition is `Unread` → `Read`; `Read` is terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationStatus {
    /// The recipient has not read the notification yet.
    #[default]
    Unread,
    /// The recipient has read the notification. Terminal.
    Read,
}

impl NotificationStatus {
    /// Whether a transition from `self` to `next` is allowed.
    pub fn can_transition_to(&self, next: NotificationStatus) -> bool {
        matches!((self, next), (Self::Unread, Self::Read))
    }

    /// Return the status as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unread => "unread",
            Self::Read => "read",
        }
    }
}

impl std::fmt::Display for NotificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
