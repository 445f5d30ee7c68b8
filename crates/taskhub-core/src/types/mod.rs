//! Shared value types: identifiers and pagination.

pub mod id;
pub mod pagination;
