//! Store error types.

use thiserror::Error;

/// Errors produced by product store operations.
///
/// The `Display` text is the message returned to HTTP callers, so it must
/// never carry internal detail.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    /// Create was called without a usable name or price.
    #[error("Name and price are required")]
    MissingFields,

    /// No product matches the requested id.
    #[error("Product not found")]
    NotFound,
}

impl StoreError {
    /// Whether the error stems from the caller's payload.
    pub fn is_validation(&self) -> bool {
        !matches!(self, StoreError::NotFound)
    }
}
