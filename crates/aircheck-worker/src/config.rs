//! Worker configuration.

use std::path::PathBuf;
use std::time::Duration;

/// Worker configuration.
///
/// The scratch directory is provisioned by the deployment; the worker only
/// writes in-flight captures into it.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Encoder executable path
    pub encoder: PathBuf,
    /// Directory for in-flight capture artifacts
    pub scratch_dir: PathBuf,
    /// Remote store connect timeout
    pub connect_timeout: Duration,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            encoder: PathBuf::from("ffmpeg"),
            scratch_dir: std::env::temp_dir(),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

impl WorkerConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            encoder: std::env::var("AIRCHECK_ENCODER")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("ffmpeg")),
            scratch_dir: std::env::var("AIRCHECK_SCRATCH_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| std::env::temp_dir()),
            connect_timeout: Duration::from_secs(
                std::env::var("AIRCHECK_CONNECT_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(5),
            ),
        }
    }
}
