//! Delivery channel enumeration.

use serde::{Deserialize, Serialize};

/// A transport used to reach the recipient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMethod {
    /// Real-time push over an active connection.
    Realtime,
    /// Email via an external transport.
    Email,
}

impl DeliveryMethod {
    /// Return the method as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Realtime => "realtime",
            Self::Email => "email",
        }
    }
}

impl std::fmt::Display for DeliveryMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
