//! Notification domain entities.

pub mod attempt;
pub mod channel;
pub mod filter;
pub mod kind;
pub mod model;
pub mod priority;
pub mod status;

pub use attempt::DeliveryAttempt;
pub use channel::DeliveryMethod;
pub use filter::NotificationFilter;
pub use kind::NotificationKind;
pub use model::{Notification, NotificationDraft};
pub use priority::Priority;
pub use status::NotificationStatus;
