//! Notification kind enumeration.

use serde::{Deserialize, Serialize};

/// Category of a notification for filtering and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// A task was assigned to the recipient.
    TaskAssigned,
    /// A task the recipient follows was updated.
    TaskUpdated,
    /// A comment was added to a task.
    TaskComment,
    /// The recipient was mentioned.
    Mention,
    /// A project the recipient belongs to was updated.
    ProjectUpdated,
    /// System-level notifications.
    System,
}

impl NotificationKind {
    /// Return the kind as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TaskAssigned => "task_assigned",
            Self::TaskUpdated => "task_updated",
            Self::TaskComment => "task_comment",
            Self::Mention => "mention",
            Self::ProjectUpdated => "project_updated",
            Self::System => "system",
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
