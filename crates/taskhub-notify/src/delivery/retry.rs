//! Bounded per-channel retry with attempt recording.

use std::time::Duration;

use tracing::{debug, warn};

use taskhub_core::config::delivery::DeliveryConfig;
use taskhub_core::types::id::UserId;
use taskhub_entity::notification::{DeliveryAttempt, Notification};

use crate::channels::{ChannelAdapter, DeliveryOutcome};

/// Explicit state of one channel's delivery cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AttemptState {
    /// About to run attempt number `attempt_no` (zero-based).
    Sending { attempt_no: u32 },
    /// A transient failure; sleep before running `next_attempt`.
    Backoff { next_attempt: u32 },
    /// The cycle settled (success or retries exhausted).
    Complete,
}

/// Drives bounded retry for a single channel and records every attempt.
///
/// Each attempt is bounded by the channel timeout; a timeout counts as a
/// failed attempt eligible for retry. Exhaustion leaves the final attempt
/// marked unsuccessful and never raises to the orchestrator.
#[derive(Debug, Clone)]
pub struct RetryCoordinator {
    max_retries: u32,
    transient_backoff: Duration,
    channel_timeout: Duration,
}

impl RetryCoordinator {
    /// Creates a coordinator from the delivery configuration.
    pub fn new(config: &DeliveryConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            transient_backoff: Duration::from_millis(config.transient_backoff_ms),
            channel_timeout: Duration::from_millis(config.channel_timeout_ms),
        }
    }

    /// Run the retry cycle for one channel.
    ///
    /// Returns the chronological attempt records; the caller appends them
    /// to the notification's audit trail.
    pub async fn run(
        &self,
        adapter: &dyn ChannelAdapter,
        notification: &Notification,
        target: UserId,
    ) -> Vec<DeliveryAttempt> {
        let method = adapter.method();
        let mut attempts = Vec::with_capacity(1);
        let mut state = AttemptState::Sending { attempt_no: 0 };

        loop {
            state = match state {
                AttemptState::Sending { attempt_no } => {
                    let outcome = match tokio::time::timeout(
                        self.channel_timeout,
                        adapter.deliver(notification, target),
                    )
                    .await
                    {
                        Ok(outcome) => outcome,
                        Err(_) => DeliveryOutcome::Failed {
                            reason: format!(
                                "send timed out after {}ms",
                                self.channel_timeout.as_millis()
                            ),
                            transient: false,
                        },
                    };

                    match outcome {
                        DeliveryOutcome::Delivered => {
                            attempts.push(DeliveryAttempt::succeeded(method));
                            debug!(
                                %method,
                                notification_id = %notification.id,
                                attempt = attempt_no + 1,
                                "Channel delivery succeeded"
                            );
                            AttemptState::Complete
                        }
                        DeliveryOutcome::Failed { reason, transient } => {
                            attempts.push(DeliveryAttempt::failed(method, &reason));
                            if attempt_no < self.max_retries {
                                debug!(
                                    %method,
                                    notification_id = %notification.id,
                                    attempt = attempt_no + 1,
                                    %reason,
                                    transient,
                                    "Channel delivery failed, retrying"
                                );
                                if transient {
                                    AttemptState::Backoff {
                                        next_attempt: attempt_no + 1,
                                    }
                                } else {
                                    AttemptState::Sending {
                                        attempt_no: attempt_no + 1,
                                    }
                                }
                            } else {
                                warn!(
                                    %method,
                                    notification_id = %notification.id,
                                    attempts = attempts.len(),
                                    %reason,
                                    "Channel delivery exhausted retries"
                                );
                                AttemptState::Complete
                            }
                        }
                    }
                }
                AttemptState::Backoff { next_attempt } => {
                    tokio::time::sleep(self.transient_backoff).await;
                    AttemptState::Sending {
                        attempt_no: next_attempt,
                    }
                }
                AttemptState::Complete => break,
            };
        }

        attempts
    }
}
