//! Per-user admission control for notification creation.

pub mod memory;

pub use memory::MemoryRateLimiter;

use async_trait::async_trait;

use taskhub_core::result::AppResult;
use taskhub_core::types::id::UserId;

/// Result of an admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    /// The request is admitted and the counter was incremented.
    Admitted {
        /// Admissions left in the current window.
        remaining: u32,
    },
    /// The user exhausted the window; nothing was incremented.
    Rejected {
        /// Milliseconds until the window resets.
        retry_after_ms: u64,
    },
}

/// Swappable per-user rate-limit store.
///
/// The in-process [`MemoryRateLimiter`] suits single-instance deployments;
/// multi-instance deployments implement this over an external atomic
/// counter store. Implementations must serialize mutation per user key so
/// concurrent calls never admit more than the window allows.
#[async_trait]
pub trait RateLimitStore: Send + Sync + 'static {
    /// Atomically check the user's window and increment on admission.
    async fn check_and_increment(&self, user_id: UserId) -> AppResult<RateLimitDecision>;
}
