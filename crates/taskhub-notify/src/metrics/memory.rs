//! In-memory metrics sink backed by atomic counters.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

use super::{DeliveryMetricsReport, MetricsSink};

/// Running totals for one metric name.
#[derive(Debug, Default)]
struct MetricSeries {
    /// Number of recorded samples.
    count: AtomicU64,
    /// Sum of sample values in milliseconds.
    total_ms: AtomicU64,
}

/// Process-local metrics sink.
#[derive(Debug, Default)]
pub struct MemoryMetricsSink {
    /// Metric name → running totals.
    series: DashMap<String, MetricSeries>,
}

impl MemoryMetricsSink {
    /// Create a new empty sink.
    pub fn new() -> Self {
        Self::default()
    }
}

impl MetricsSink for MemoryMetricsSink {
    fn record(&self, name: &str, value_ms: u64) {
        let series = self.series.entry(name.to_string()).or_default();
        series.count.fetch_add(1, Ordering::Relaxed);
        series.total_ms.fetch_add(value_ms, Ordering::Relaxed);
    }

    fn report(&self, name: &str) -> DeliveryMetricsReport {
        match self.series.get(name) {
            Some(series) => {
                let count = series.count.load(Ordering::Relaxed);
                let total = series.total_ms.load(Ordering::Relaxed);
                DeliveryMetricsReport {
                    count,
                    average_ms: if count == 0 {
                        0.0
                    } else {
                        total as f64 / count as f64
                    },
                }
            }
            None => DeliveryMetricsReport::default(),
        }
    }
}
