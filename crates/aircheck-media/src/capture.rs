//! Deadline-bounded capture runner.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, warn};

use aircheck_models::CaptureSpec;

use crate::command::CaptureCommand;
use crate::error::{MediaError, MediaResult};

/// Grace period added on top of the record duration before the encoder is
/// forcibly terminated. Covers encoder startup and flush overhead; never
/// part of the recorded duration itself.
pub const CAPTURE_GRACE_SECS: u64 = 30;

/// Seconds until the hard cutoff for a capture of the given duration.
pub fn deadline_secs(duration_secs: u64) -> u64 {
    duration_secs + CAPTURE_GRACE_SECS
}

/// Runs the encoder subprocess, bounded by a hard deadline.
///
/// The deadline is derived from the capture duration unless overridden; an
/// encoder still running at the cutoff is killed, not abandoned. On failure
/// a partial file may remain at the output path; its fate belongs to the
/// caller, which may want it for diagnosis.
#[derive(Debug, Clone, Default)]
pub struct CaptureRunner {
    /// Deadline override in seconds
    timeout_secs: Option<u64>,
}

impl CaptureRunner {
    /// Create a new runner.
    pub fn new() -> Self {
        Self { timeout_secs: None }
    }

    /// Override the deadline.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Capture the spec's stream to `output`.
    pub async fn capture(&self, spec: &CaptureSpec, output: &Path) -> MediaResult<()> {
        let encoder = check_encoder(&spec.encoder)?;
        let cmd = CaptureCommand::new(&spec.stream_url, output).duration(spec.duration_secs);
        let args = cmd.build_args();
        debug!("Running encoder: {} {}", encoder.display(), args.join(" "));

        let deadline = self
            .timeout_secs
            .unwrap_or_else(|| deadline_secs(spec.duration_secs));

        let mut child = Command::new(&encoder)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        let status = match tokio::time::timeout(Duration::from_secs(deadline), child.wait()).await
        {
            Ok(status) => status?,
            Err(_) => {
                warn!(
                    "Encoder overran its {}s deadline, killing process",
                    deadline
                );
                let _ = child.kill().await;
                return Err(MediaError::Timeout(deadline));
            }
        };

        if status.success() {
            Ok(())
        } else {
            Err(MediaError::encoder_failed(status.code()))
        }
    }
}

/// Resolve the encoder executable, failing if it does not exist.
pub fn check_encoder(encoder: impl AsRef<Path>) -> MediaResult<PathBuf> {
    let encoder = encoder.as_ref();
    which::which(encoder).map_err(|_| MediaError::EncoderNotFound(encoder.to_path_buf()))
}
