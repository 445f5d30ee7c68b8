//! Delivery performance metrics.

pub mod memory;

pub use memory::MemoryMetricsSink;

use serde::{Deserialize, Serialize};

/// Metric name for end-to-end notification delivery latency.
pub const DELIVERY_METRIC: &str = "notification_delivery";

/// Aggregate view of one named metric.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DeliveryMetricsReport {
    /// Number of recorded samples.
    pub count: u64,
    /// Mean sample value in milliseconds; 0.0 with no samples.
    pub average_ms: f64,
}

/// Sink for delivery latency samples.
pub trait MetricsSink: Send + Sync + 'static {
    /// Record one sample in milliseconds under a metric name.
    fn record(&self, name: &str, value_ms: u64);

    /// Aggregate the samples recorded under a metric name.
    fn report(&self, name: &str) -> DeliveryMetricsReport;
}
