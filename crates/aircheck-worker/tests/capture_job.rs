//! Capture job tests with a scripted encoder and an in-memory store.

#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;

use aircheck_media::{CaptureRunner, MediaError};
use aircheck_models::CaptureSpec;
use aircheck_storage::{RemoteStore, StorageError, StorageResult};
use aircheck_worker::{CaptureJob, DeliveryOutcome, JobOutcome};

#[derive(Clone, Copy)]
enum FailMode {
    None,
    Connect,
    Transfer,
}

/// Remote store stand-in that records deliveries and fails on demand.
struct MockStore {
    fail: FailMode,
    delivered: Mutex<Vec<PathBuf>>,
}

impl MockStore {
    fn new(fail: FailMode) -> Arc<Self> {
        Arc::new(Self {
            fail,
            delivered: Mutex::new(Vec::new()),
        })
    }

    fn delivered(&self) -> Vec<PathBuf> {
        self.delivered.lock().unwrap().clone()
    }
}

#[async_trait]
impl RemoteStore for MockStore {
    async fn deliver(&self, local: &Path) -> StorageResult<String> {
        match self.fail {
            FailMode::Connect => return Err(StorageError::connect_failed("mock down")),
            FailMode::Transfer => return Err(StorageError::transfer_failed("mock refused")),
            FailMode::None => {}
        }
        self.delivered.lock().unwrap().push(local.to_path_buf());
        Ok(local.file_name().unwrap().to_string_lossy().to_string())
    }

    fn destination(&self) -> String {
        "mock://archive".to_string()
    }
}

/// Write an executable stand-in for the encoder.
fn fake_encoder(dir: &TempDir, body: &str) -> PathBuf {
    let path = dir.path().join("encoder");
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Encoder that writes the output file and succeeds.
fn recording_encoder(dir: &TempDir) -> PathBuf {
    fake_encoder(
        dir,
        "for a in \"$@\"; do out=\"$a\"; done; echo audio > \"$out\"",
    )
}

fn spec_for(encoder: &Path) -> CaptureSpec {
    CaptureSpec::new("http://radio.test/live", 5, encoder)
}

#[tokio::test]
async fn delivered_job_removes_local_artifact() {
    let dir = TempDir::new().unwrap();
    let store = MockStore::new(FailMode::None);
    let job = CaptureJob::new(spec_for(&recording_encoder(&dir)), dir.path(), store.clone());

    let report = job.run().await;
    match report.outcome {
        JobOutcome::Delivered {
            remote_name,
            artifact,
            cleanup,
        } => {
            assert!(remote_name.ends_with("-5.mp3"));
            assert!(cleanup.finished().await);
            assert!(!artifact.exists(), "artifact must be removed after delivery");
            assert_eq!(store.delivered(), vec![artifact]);
        }
        other => panic!("expected Delivered, got {:?}", other),
    }
}

#[tokio::test]
async fn capture_failure_skips_delivery_and_keeps_partial_artifact() {
    let dir = TempDir::new().unwrap();
    // Writes a partial file, then fails.
    let encoder = fake_encoder(
        &dir,
        "for a in \"$@\"; do out=\"$a\"; done; echo partial > \"$out\"; exit 1",
    );
    let store = MockStore::new(FailMode::None);
    let job = CaptureJob::new(spec_for(&encoder), dir.path(), store.clone());

    let report = job.run().await;
    match report.outcome {
        JobOutcome::CaptureFailed { error, artifact } => {
            assert!(matches!(error, MediaError::EncoderFailed { .. }));
            assert!(artifact.exists(), "partial artifact is kept for inspection");
        }
        other => panic!("expected CaptureFailed, got {:?}", other),
    }
    assert!(store.delivered().is_empty(), "no delivery after capture failure");
}

#[tokio::test]
async fn timed_out_capture_never_reaches_the_store() {
    let dir = TempDir::new().unwrap();
    let encoder = fake_encoder(&dir, "sleep 30");
    let store = MockStore::new(FailMode::None);
    let job = CaptureJob::new(spec_for(&encoder), dir.path(), store.clone())
        .with_runner(CaptureRunner::new().with_timeout(1));

    let report = job.run().await;
    match report.outcome {
        JobOutcome::CaptureFailed { error, .. } => {
            assert!(matches!(error, MediaError::Timeout(1)));
        }
        other => panic!("expected CaptureFailed, got {:?}", other),
    }
    assert!(store.delivered().is_empty());
}

#[tokio::test]
async fn transfer_failure_retains_artifact() {
    let dir = TempDir::new().unwrap();
    let store = MockStore::new(FailMode::Transfer);
    let job = CaptureJob::new(spec_for(&recording_encoder(&dir)), dir.path(), store.clone());

    let report = job.run().await;
    match report.outcome {
        JobOutcome::DeliveryFailed { delivery, artifact } => {
            assert!(matches!(delivery, DeliveryOutcome::Failed(_)));
            assert!(artifact.exists(), "artifact survives a failed transfer");
        }
        other => panic!("expected DeliveryFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn unreachable_store_aborts_and_retains_artifact() {
    let dir = TempDir::new().unwrap();
    let store = MockStore::new(FailMode::Connect);
    let job = CaptureJob::new(spec_for(&recording_encoder(&dir)), dir.path(), store.clone());

    let report = job.run().await;
    match report.outcome {
        JobOutcome::DeliveryFailed { delivery, artifact } => {
            assert!(matches!(delivery, DeliveryOutcome::Aborted(_)));
            assert!(artifact.exists(), "artifact survives an aborted delivery");
        }
        other => panic!("expected DeliveryFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn consecutive_jobs_use_distinct_artifact_names() {
    let dir = TempDir::new().unwrap();
    let encoder = recording_encoder(&dir);
    let store = MockStore::new(FailMode::None);

    let first = CaptureJob::new(spec_for(&encoder), dir.path(), store.clone())
        .run()
        .await;
    // Artifact names carry second precision; cross the boundary.
    tokio::time::sleep(std::time::Duration::from_millis(1100)).await;
    let second = CaptureJob::new(spec_for(&encoder), dir.path(), store.clone())
        .run()
        .await;

    let name = |report: &aircheck_worker::JobReport| match &report.outcome {
        JobOutcome::Delivered { remote_name, .. } => remote_name.clone(),
        other => panic!("expected Delivered, got {:?}", other),
    };
    assert_ne!(name(&first), name(&second));
}
