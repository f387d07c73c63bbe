//! FTP remote store for captured artifacts.
//!
//! This crate provides:
//! - The [`RemoteStore`] seam the capture job delivers through
//! - An FTP implementation with timeout-bounded connect, credential login,
//!   an ensure-or-create-then-descend directory walk, and streaming upload

pub mod error;
pub mod store;

pub use error::{StorageError, StorageResult};
pub use store::{FtpStore, RemoteStore, FTP_PORT};
