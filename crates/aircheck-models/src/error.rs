//! Configuration error types.

use thiserror::Error;

/// Result type for model construction and parsing.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised while constructing a capture from trigger input.
///
/// These are fatal for the trigger instance that supplied the input, and are
/// reported at the trigger boundary before any subprocess or network work
/// starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("Invalid duration '{0}': expected non-negative integer seconds")]
    InvalidDuration(String),

    #[error("Invalid store location: {0}")]
    InvalidLocation(String),
}

impl ModelError {
    /// Create an invalid-location error.
    ///
    /// Callers pass a reason, never the raw location string, so credentials
    /// embedded in the input cannot end up in logs.
    pub fn invalid_location(reason: impl Into<String>) -> Self {
        Self::InvalidLocation(reason.into())
    }
}
