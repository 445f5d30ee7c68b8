//! Notification creation orchestrator.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Instant;

use tracing::{error, info, warn};

use taskhub_core::config::delivery::DeliveryConfig;
use taskhub_core::error::AppError;
use taskhub_core::result::AppResult;
use taskhub_entity::notification::{
    DeliveryAttempt, DeliveryMethod, Notification, NotificationDraft,
};

use crate::channels::ChannelAdapter;
use crate::limiter::{RateLimitDecision, RateLimitStore};
use crate::metrics::{DELIVERY_METRIC, MetricsSink};
use crate::store::NotificationStore;

use super::retry::RetryCoordinator;

/// Orchestrates notification creation: validation, admission control,
/// persistence, concurrent channel fan-out, attempt aggregation, and
/// metrics.
///
/// Channel failures are absorbed into the audit trail; creation only fails
/// on validation, rate-limit rejection, or a store error.
pub struct DeliveryService {
    /// Durable notification storage.
    store: Arc<dyn NotificationStore>,
    /// Per-user admission control.
    limiter: Arc<dyn RateLimitStore>,
    /// One adapter per supported channel.
    adapters: HashMap<DeliveryMethod, Arc<dyn ChannelAdapter>>,
    /// Per-channel retry driver.
    retry: RetryCoordinator,
    /// Delivery latency sink.
    metrics: Arc<dyn MetricsSink>,
}

impl DeliveryService {
    /// Creates a new delivery service.
    ///
    /// `adapters` are keyed by their reported channel; registering two
    /// adapters for the same channel keeps the last one.
    pub fn new(
        store: Arc<dyn NotificationStore>,
        limiter: Arc<dyn RateLimitStore>,
        adapters: Vec<Arc<dyn ChannelAdapter>>,
        metrics: Arc<dyn MetricsSink>,
        config: DeliveryConfig,
    ) -> Self {
        Self {
            store,
            limiter,
            adapters: adapters.into_iter().map(|a| (a.method(), a)).collect(),
            retry: RetryCoordinator::new(&config),
            metrics,
        }
    }

    /// Create a notification and fan it out to every requested channel.
    ///
    /// Returns the persisted record including the final attempt history.
    /// The notification counts as created regardless of individual channel
    /// outcomes.
    pub async fn create_notification(&self, draft: NotificationDraft) -> AppResult<Notification> {
        let started = Instant::now();
        let draft = self.validate(draft)?;

        match self.limiter.check_and_increment(draft.user_id).await? {
            RateLimitDecision::Admitted { .. } => {}
            RateLimitDecision::Rejected { retry_after_ms } => {
                warn!(
                    user_id = %draft.user_id,
                    retry_after_ms,
                    "Notification creation rate limited"
                );
                return Err(AppError::rate_limited(format!(
                    "Creation limit reached for user {}; retry in {retry_after_ms}ms",
                    draft.user_id
                )));
            }
        }

        let notification = self
            .store
            .create(&Notification::from_draft(draft))
            .await
            .map_err(|e| AppError::internal(format!("Failed to persist notification: {e}")))?;

        let attempts = self.fan_out(&notification).await;

        let notification = self
            .store
            .append_attempts(notification.id, notification.version, &attempts)
            .await
            .map_err(|e| AppError::internal(format!("Failed to record delivery attempts: {e}")))?;

        let elapsed_ms = started.elapsed().as_millis() as u64;
        self.metrics.record(DELIVERY_METRIC, elapsed_ms);

        info!(
            notification_id = %notification.id,
            user_id = %notification.user_id,
            channels = notification.delivery_methods.len(),
            attempts = notification.delivery_attempts.len(),
            elapsed_ms,
            "Notification created"
        );

        Ok(notification)
    }

    /// Reject malformed drafts before any side effect. Duplicate channels
    /// are collapsed, preserving first-seen order.
    fn validate(&self, mut draft: NotificationDraft) -> AppResult<NotificationDraft> {
        if draft.title.trim().is_empty() {
            return Err(AppError::validation("title is required"));
        }
        if draft.message.trim().is_empty() {
            return Err(AppError::validation("message is required"));
        }

        let mut seen = HashSet::new();
        draft.delivery_methods.retain(|m| seen.insert(*m));
        if draft.delivery_methods.is_empty() {
            return Err(AppError::validation(
                "at least one delivery method is required",
            ));
        }
        for method in &draft.delivery_methods {
            if !self.adapters.contains_key(method) {
                return Err(AppError::validation(format!(
                    "no adapter registered for channel '{method}'"
                )));
            }
        }

        Ok(draft)
    }

    /// Dispatch one task per channel and wait for all of them.
    ///
    /// A failing channel never cancels its siblings; a panicked task is
    /// recorded as a failed attempt for that channel.
    async fn fan_out(&self, notification: &Notification) -> Vec<DeliveryAttempt> {
        let mut results = Vec::with_capacity(notification.delivery_methods.len());
        let mut handles = Vec::with_capacity(notification.delivery_methods.len());

        for method in &notification.delivery_methods {
            let Some(adapter) = self.adapters.get(method) else {
                // Guarded by validation; recorded rather than raised.
                results.push(DeliveryAttempt::failed(*method, "no adapter registered"));
                continue;
            };
            let adapter = Arc::clone(adapter);
            let retry = self.retry.clone();
            let notification = notification.clone();
            handles.push((
                *method,
                tokio::spawn(async move {
                    let target = notification.user_id;
                    retry.run(adapter.as_ref(), &notification, target).await
                }),
            ));
        }

        for (method, handle) in handles {
            match handle.await {
                Ok(attempts) => results.extend(attempts),
                Err(e) => {
                    error!(%method, error = %e, "Delivery task aborted");
                    results.push(DeliveryAttempt::failed(
                        method,
                        format!("delivery task aborted: {e}"),
                    ));
                }
            }
        }

        results
    }
}
