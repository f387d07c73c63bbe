//! Storage error types.

use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur while delivering an artifact.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to connect: {0}")]
    ConnectFailed(String),

    #[error("Authentication rejected: {0}")]
    AuthFailed(String),

    #[error("Remote path segment unavailable: '{0}'")]
    PathUnavailable(String),

    #[error("Transfer failed: {0}")]
    TransferFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StorageError {
    pub fn connect_failed(msg: impl Into<String>) -> Self {
        Self::ConnectFailed(msg.into())
    }

    pub fn auth_failed(msg: impl Into<String>) -> Self {
        Self::AuthFailed(msg.into())
    }

    pub fn transfer_failed(msg: impl Into<String>) -> Self {
        Self::TransferFailed(msg.into())
    }

    /// Whether the failure happened before any bytes moved.
    ///
    /// Connect, auth, path and local-read failures abort the delivery
    /// outright; only [`StorageError::TransferFailed`] means a transfer was
    /// actually attempted.
    pub fn before_transfer(&self) -> bool {
        !matches!(self, Self::TransferFailed(_))
    }
}
