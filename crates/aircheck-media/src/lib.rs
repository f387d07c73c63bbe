//! FFmpeg CLI wrapper for bounded stream capture.
//!
//! This crate provides:
//! - Type-safe encoder command building
//! - A deadline-bounded runner that kills the encoder at the cutoff
//! - Encoder executable resolution

pub mod capture;
pub mod command;
pub mod error;

pub use capture::{check_encoder, deadline_secs, CaptureRunner, CAPTURE_GRACE_SECS};
pub use command::CaptureCommand;
pub use error::{MediaError, MediaResult};
