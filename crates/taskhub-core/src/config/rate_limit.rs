//! Per-user creation rate-limit configuration.

use serde::{Deserialize, Serialize};

/// Fixed-window rate limiting for notification creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Maximum creations admitted per user per window.
    #[serde(default = "default_max_per_window")]
    pub max_per_window: u32,
    /// Window duration in milliseconds.
    #[serde(default = "default_window_duration")]
    pub window_duration_ms: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_per_window: default_max_per_window(),
            window_duration_ms: default_window_duration(),
        }
    }
}

fn default_max_per_window() -> u32 {
    5
}

fn default_window_duration() -> u64 {
    60_000
}
