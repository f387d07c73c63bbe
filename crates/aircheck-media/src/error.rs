//! Error types for capture operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for capture operations.
pub type MediaResult<T> = Result<T, MediaError>;

/// Errors that can occur while running the encoder.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("Encoder not found: {0}")]
    EncoderNotFound(PathBuf),

    #[error("Encoder exited with status {exit_code:?}")]
    EncoderFailed { exit_code: Option<i32> },

    #[error("Capture timed out after {0} seconds")]
    Timeout(u64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MediaError {
    /// Create an encoder failure error from an exit code.
    pub fn encoder_failed(exit_code: Option<i32>) -> Self {
        Self::EncoderFailed { exit_code }
    }
}
