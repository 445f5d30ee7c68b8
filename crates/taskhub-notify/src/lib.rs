//! # taskhub-notify
//!
//! The TaskHub notification delivery engine. Validates creation requests,
//! applies per-user admission control, persists the record, fans out to the
//! requested channels concurrently with bounded per-channel retry, and
//! keeps an append-only delivery audit trail.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references. Durable storage, realtime
//! push, and email transports are trait seams implemented by callers;
//! in-memory implementations are provided for single-node deployments
//! and tests.

pub mod channels;
pub mod delivery;
pub mod limiter;
pub mod metrics;
pub mod query;
pub mod store;

pub use channels::{ChannelAdapter, DeliveryOutcome, EmailAdapter, RealtimeAdapter};
pub use delivery::{DeliveryService, RetryCoordinator};
pub use limiter::{MemoryRateLimiter, RateLimitDecision, RateLimitStore};
pub use metrics::{DeliveryMetricsReport, MemoryMetricsSink, MetricsSink};
pub use query::{NotificationPage, QueryService};
pub use store::{MemoryNotificationStore, NotificationStore};
