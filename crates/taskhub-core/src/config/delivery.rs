//! Channel delivery and retry configuration.

use serde::{Deserialize, Serialize};

/// Delivery fan-out and retry configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryConfig {
    /// Maximum retries per channel after the initial attempt.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Backoff in milliseconds before retrying a transient failure.
    #[serde(default = "default_transient_backoff")]
    pub transient_backoff_ms: u64,
    /// Upper bound in milliseconds for a single channel send.
    #[serde(default = "default_channel_timeout")]
    pub channel_timeout_ms: u64,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            transient_backoff_ms: default_transient_backoff(),
            channel_timeout_ms: default_channel_timeout(),
        }
    }
}

fn default_max_retries() -> u32 {
    1
}

fn default_transient_backoff() -> u64 {
    200
}

fn default_channel_timeout() -> u64 {
    5_000
}
