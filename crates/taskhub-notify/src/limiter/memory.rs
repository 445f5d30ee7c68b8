//! In-memory fixed-window rate limiter for single-node deployments.

use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::time::Instant;

use taskhub_core::config::rate_limit::RateLimitConfig;
use taskhub_core::result::AppResult;
use taskhub_core::types::id::UserId;

use super::{RateLimitDecision, RateLimitStore};

/// Per-user window state.
#[derive(Debug, Clone, Copy)]
struct WindowState {
    /// Admissions in the current window.
    count: u32,
    /// When the current window opened.
    window_start: Instant,
}

/// Fixed-window counter keyed by user.
///
/// The map's entry guard serializes mutation per user key, so concurrent
/// calls for the same user cannot admit past `max_per_window`.
#[derive(Debug)]
pub struct MemoryRateLimiter {
    /// User → window state.
    windows: DashMap<UserId, WindowState>,
    /// Maximum admissions per window.
    max_per_window: u32,
    /// Window duration.
    window_duration: Duration,
}

impl MemoryRateLimiter {
    /// Creates a new limiter from configuration.
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            windows: DashMap::new(),
            max_per_window: config.max_per_window,
            window_duration: Duration::from_millis(config.window_duration_ms),
        }
    }
}

#[async_trait]
impl RateLimitStore for MemoryRateLimiter {
    async fn check_and_increment(&self, user_id: UserId) -> AppResult<RateLimitDecision> {
        let now = Instant::now();
        let mut entry = self.windows.entry(user_id).or_insert(WindowState {
            count: 0,
            window_start: now,
        });

        if now.duration_since(entry.window_start) >= self.window_duration {
            entry.count = 0;
            entry.window_start = now;
        }

        if entry.count >= self.max_per_window {
            let elapsed = now.duration_since(entry.window_start);
            let retry_after_ms = self
                .window_duration
                .saturating_sub(elapsed)
                .as_millis() as u64;
            return Ok(RateLimitDecision::Rejected { retry_after_ms });
        }

        entry.count += 1;
        Ok(RateLimitDecision::Admitted {
            remaining: self.max_per_window - entry.count,
        })
    }
}
