//! Delivery orchestration: fan-out and per-channel retry.

pub mod retry;
pub mod service;

pub use retry::RetryCoordinator;
pub use service::DeliveryService;
