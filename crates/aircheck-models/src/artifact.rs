//! Artifact naming.

use chrono::{DateTime, Utc};

/// Timestamp layout baked into every artifact name.
pub const ARTIFACT_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H-%M-%S";

/// Name the local artifact for a capture.
///
/// The name is derived from the capture start time and the duration bound,
/// so two runs starting in different seconds never collide even when their
/// duration bounds are identical. The remote object reuses this name with
/// the directory stripped.
pub fn artifact_file_name(started_at: DateTime<Utc>, duration_secs: u64) -> String {
    format!(
        "{}-{}.mp3",
        started_at.format(ARTIFACT_TIMESTAMP_FORMAT),
        duration_secs
    )
}
