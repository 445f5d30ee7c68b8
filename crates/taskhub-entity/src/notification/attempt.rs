//! Delivery attempt audit records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::channel::DeliveryMethod;

/// One recorded try (success or failure) of sending via a specific channel.
///
/// Attempts are append-only: they are never truncated or reordered, and the
/// last attempt per channel determines that channel's final outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryAttempt {
    /// The channel this attempt used.
    pub method: DeliveryMethod,
    /// Whether the send was accepted by the transport.
    pub success: bool,
    /// When the attempt completed.
    pub attempted_at: DateTime<Utc>,
    /// Failure detail, populated when `success` is false.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,
}

impl DeliveryAttempt {
    /// Record a successful attempt.
    pub fn succeeded(method: DeliveryMethod) -> Self {
        Self {
            method,
            success: true,
            attempted_at: Utc::now(),
            error_detail: None,
        }
    }

    /// Record a failed attempt with detail.
    pub fn failed(method: DeliveryMethod, detail: impl Into<String>) -> Self {
        Self {
            method,
            success: false,
            attempted_at: Utc::now(),
            error_detail: Some(detail.into()),
        }
    }
}
