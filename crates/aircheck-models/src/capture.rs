//! Capture specification and duration parsing.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};

/// One bounded-duration capture, fixed at trigger time.
///
/// Immutable once constructed; a new spec is built for every trigger firing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureSpec {
    /// Stream source URI handed to the encoder as input.
    pub stream_url: String,
    /// Record-duration bound in seconds.
    pub duration_secs: u64,
    /// Resolved encoder executable path (deployment-time configuration).
    pub encoder: PathBuf,
}

impl CaptureSpec {
    /// Create a new capture spec.
    pub fn new(
        stream_url: impl Into<String>,
        duration_secs: u64,
        encoder: impl Into<PathBuf>,
    ) -> Self {
        Self {
            stream_url: stream_url.into(),
            duration_secs,
            encoder: encoder.into(),
        }
    }
}

/// Parse a duration bound to whole seconds.
///
/// Accepts plain non-negative integers only; anything else is a
/// configuration error for the trigger that supplied it, never a silent
/// default.
pub fn parse_duration_secs(input: &str) -> ModelResult<u64> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ModelError::InvalidDuration(String::new()));
    }
    input
        .parse::<u64>()
        .map_err(|_| ModelError::InvalidDuration(input.to_string()))
}

/// Duration bound as it arrives on the wire.
///
/// Triggers historically sent the record timeout as a JSON string; newer
/// clients send an integer. Both forms decode here and resolve through
/// [`DurationField::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DurationField {
    Secs(u64),
    Text(String),
}

impl DurationField {
    /// Resolve to whole seconds, rejecting malformed text forms.
    pub fn parse(&self) -> ModelResult<u64> {
        match self {
            Self::Secs(n) => Ok(*n),
            Self::Text(s) => parse_duration_secs(s),
        }
    }
}

impl std::fmt::Display for DurationField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Secs(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration_valid() {
        assert_eq!(parse_duration_secs("0").unwrap(), 0);
        assert_eq!(parse_duration_secs("10").unwrap(), 10);
        assert_eq!(parse_duration_secs(" 3600 ").unwrap(), 3600);
    }

    #[test]
    fn test_parse_duration_rejects_garbage() {
        assert!(matches!(
            parse_duration_secs("abc"),
            Err(ModelError::InvalidDuration(_))
        ));
        assert!(matches!(
            parse_duration_secs("-5"),
            Err(ModelError::InvalidDuration(_))
        ));
        assert!(matches!(
            parse_duration_secs("1.5"),
            Err(ModelError::InvalidDuration(_))
        ));
        assert!(matches!(
            parse_duration_secs(""),
            Err(ModelError::InvalidDuration(_))
        ));
    }

    #[test]
    fn test_duration_field_from_json_forms() {
        let text: DurationField = serde_json::from_str("\"10\"").unwrap();
        assert_eq!(text.parse().unwrap(), 10);

        let secs: DurationField = serde_json::from_str("10").unwrap();
        assert_eq!(secs.parse().unwrap(), 10);

        let bad: DurationField = serde_json::from_str("\"abc\"").unwrap();
        assert!(bad.parse().is_err());
    }

    #[test]
    fn test_capture_spec_construction() {
        let spec = CaptureSpec::new("rtsp://example/stream", 10, "/usr/bin/ffmpeg");
        assert_eq!(spec.stream_url, "rtsp://example/stream");
        assert_eq!(spec.duration_secs, 10);
        assert_eq!(spec.encoder, PathBuf::from("/usr/bin/ffmpeg"));
    }
}
