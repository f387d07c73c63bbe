//! Encoder command builder.

use std::path::{Path, PathBuf};

/// Builder for a stream-capture encoder invocation.
#[derive(Debug, Clone)]
pub struct CaptureCommand {
    /// Stream source URI
    input: String,
    /// Output file path
    output: PathBuf,
    /// Record-duration limit in seconds, if bounded
    duration_secs: Option<u64>,
    /// Whether to overwrite an existing output file
    overwrite: bool,
    /// Log level
    log_level: String,
}

impl CaptureCommand {
    /// Create a new capture command.
    pub fn new(input: impl Into<String>, output: impl AsRef<Path>) -> Self {
        Self {
            input: input.into(),
            output: output.as_ref().to_path_buf(),
            duration_secs: None,
            overwrite: true,
            log_level: "error".to_string(),
        }
    }

    /// Set the record-duration limit.
    pub fn duration(mut self, secs: u64) -> Self {
        self.duration_secs = Some(secs);
        self
    }

    /// Set whether to overwrite an existing output file.
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Set the encoder log level.
    pub fn log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Output file path.
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Build the command arguments.
    pub fn build_args(&self) -> Vec<String> {
        let mut args = Vec::new();

        // Overwrite flag
        if self.overwrite {
            args.push("-y".to_string());
        }

        // Log level
        args.push("-v".to_string());
        args.push(self.log_level.clone());

        // Input stream
        args.push("-i".to_string());
        args.push(self.input.clone());

        // Hard record-duration limit
        if let Some(secs) = self.duration_secs {
            args.push("-t".to_string());
            args.push(secs.to_string());
        }

        // Output file
        args.push(self.output.to_string_lossy().to_string());

        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_builder() {
        let cmd = CaptureCommand::new("rtsp://example/stream", "/tmp/out.mp3").duration(10);

        let args = cmd.build_args();
        assert_eq!(args[0], "-y");
        assert!(args.contains(&"-i".to_string()));
        assert!(args.contains(&"rtsp://example/stream".to_string()));
        assert!(args.contains(&"-t".to_string()));
        assert!(args.contains(&"10".to_string()));
        assert_eq!(args.last().unwrap(), "/tmp/out.mp3");
    }

    #[test]
    fn test_duration_follows_input() {
        let cmd = CaptureCommand::new("http://radio/live", "out.mp3").duration(90);
        let args = cmd.build_args();

        let i = args.iter().position(|a| a == "-i").unwrap();
        let t = args.iter().position(|a| a == "-t").unwrap();
        assert!(t > i, "-t must be an output option");
    }

    #[test]
    fn test_no_overwrite() {
        let cmd = CaptureCommand::new("http://radio/live", "out.mp3").overwrite(false);
        assert!(!cmd.build_args().contains(&"-y".to_string()));
    }

    #[test]
    fn test_unbounded_command_has_no_limit() {
        let cmd = CaptureCommand::new("http://radio/live", "out.mp3");
        assert!(!cmd.build_args().contains(&"-t".to_string()));
    }
}
