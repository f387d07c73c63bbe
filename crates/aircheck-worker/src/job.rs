//! One end-to-end capture job.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use aircheck_media::{CaptureRunner, MediaError};
use aircheck_models::{artifact_file_name, CaptureSpec, JobId, ModelResult, TriggerRequest};
use aircheck_storage::{FtpStore, RemoteStore, StorageError, StorageResult};

use crate::config::WorkerConfig;

/// Tri-state result of the archival step.
#[derive(Debug)]
pub enum DeliveryOutcome {
    /// Stored remotely under the given name.
    Delivered { remote_name: String },
    /// Failed during the transfer itself.
    Failed(StorageError),
    /// Failed before any bytes moved (connect, auth, path walk).
    Aborted(StorageError),
}

impl DeliveryOutcome {
    fn from_result(result: StorageResult<String>) -> Self {
        match result {
            Ok(remote_name) => Self::Delivered { remote_name },
            Err(e) if e.before_transfer() => Self::Aborted(e),
            Err(e) => Self::Failed(e),
        }
    }
}

/// Handle on the background removal of a delivered artifact.
///
/// Dropping the handle detaches the removal; awaiting [`CleanupTask::finished`]
/// observes it. Reporting success never waits on this.
#[derive(Debug)]
pub struct CleanupTask(JoinHandle<bool>);

impl CleanupTask {
    /// Wait for the removal to complete; `true` when the file is gone.
    pub async fn finished(self) -> bool {
        self.0.await.unwrap_or(false)
    }
}

/// Terminal state of one job run.
#[derive(Debug)]
pub enum JobOutcome {
    /// Encoder failed or timed out. The artifact (possibly partial, possibly
    /// absent) is left in place for inspection, and no delivery is attempted.
    CaptureFailed { error: MediaError, artifact: PathBuf },
    /// Capture succeeded but delivery did not. The artifact is deliberately
    /// retained so a transient remote problem cannot lose the recording.
    DeliveryFailed {
        delivery: DeliveryOutcome,
        artifact: PathBuf,
    },
    /// Delivered. Local cleanup runs in the background.
    Delivered {
        remote_name: String,
        artifact: PathBuf,
        cleanup: CleanupTask,
    },
}

impl JobOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Delivered { .. })
    }
}

/// Report returned to the trigger that fired the job.
#[derive(Debug)]
pub struct JobReport {
    pub job_id: JobId,
    pub outcome: JobOutcome,
}

/// One capture-and-archive unit of work.
///
/// `run` never returns an error: every failure is a terminal state in the
/// report, logged with phase and destination context, and the hosting
/// trigger stays alive for the next firing.
pub struct CaptureJob {
    id: JobId,
    spec: CaptureSpec,
    scratch_dir: PathBuf,
    store: Arc<dyn RemoteStore>,
    runner: CaptureRunner,
}

impl CaptureJob {
    /// Create a job from validated pieces.
    pub fn new(spec: CaptureSpec, scratch_dir: impl Into<PathBuf>, store: Arc<dyn RemoteStore>) -> Self {
        Self {
            id: JobId::new(),
            spec,
            scratch_dir: scratch_dir.into(),
            store,
            runner: CaptureRunner::new(),
        }
    }

    /// Build a job straight from a trigger request.
    ///
    /// Malformed duration or destination strings fail here, at the trigger
    /// boundary, before the job exists.
    pub fn from_trigger(trigger: &TriggerRequest, config: &WorkerConfig) -> ModelResult<Self> {
        let parsed = trigger.validate()?;
        let spec = CaptureSpec::new(parsed.stream_url, parsed.duration_secs, &config.encoder);
        let store =
            FtpStore::new(parsed.location).with_connect_timeout(config.connect_timeout);
        Ok(Self::new(spec, config.scratch_dir.clone(), Arc::new(store)))
    }

    /// Override the capture runner.
    pub fn with_runner(mut self, runner: CaptureRunner) -> Self {
        self.runner = runner;
        self
    }

    /// This job's identifier.
    pub fn id(&self) -> &JobId {
        &self.id
    }

    /// Run the job to a terminal state.
    pub async fn run(self) -> JobReport {
        let started_at = Utc::now();
        let artifact = self
            .scratch_dir
            .join(artifact_file_name(started_at, self.spec.duration_secs));

        info!(
            job_id = %self.id,
            "Capture started: {} for {}s -> {}",
            self.spec.stream_url,
            self.spec.duration_secs,
            artifact.display()
        );

        if let Err(error) = self.runner.capture(&self.spec, &artifact).await {
            error!(
                job_id = %self.id,
                "Capture failed: {} (anything at {} is kept for inspection)",
                error,
                artifact.display()
            );
            return JobReport {
                job_id: self.id,
                outcome: JobOutcome::CaptureFailed { error, artifact },
            };
        }
        info!(job_id = %self.id, "Capture done: {}", artifact.display());

        let delivery = DeliveryOutcome::from_result(self.store.deliver(&artifact).await);
        let outcome = match delivery {
            DeliveryOutcome::Delivered { remote_name } => {
                info!(
                    job_id = %self.id,
                    "Archived '{}' at {}",
                    remote_name,
                    self.store.destination()
                );
                let cleanup = spawn_cleanup(self.id.clone(), artifact.clone());
                JobOutcome::Delivered {
                    remote_name,
                    artifact,
                    cleanup,
                }
            }
            delivery @ (DeliveryOutcome::Failed(_) | DeliveryOutcome::Aborted(_)) => {
                error!(
                    job_id = %self.id,
                    "Delivery to {} failed: {:?}; artifact retained at {}",
                    self.store.destination(),
                    delivery,
                    artifact.display()
                );
                JobOutcome::DeliveryFailed { delivery, artifact }
            }
        };

        JobReport {
            job_id: self.id,
            outcome,
        }
    }
}

/// Remove a delivered artifact off the success-reporting path.
fn spawn_cleanup(job_id: JobId, artifact: PathBuf) -> CleanupTask {
    CleanupTask(tokio::spawn(async move {
        match tokio::fs::remove_file(&artifact).await {
            Ok(()) => {
                debug!(job_id = %job_id, "Removed local artifact {}", artifact.display());
                true
            }
            Err(e) => {
                warn!(
                    job_id = %job_id,
                    "Failed to remove local artifact {}: {}",
                    artifact.display(),
                    e
                );
                false
            }
        }
    }))
}
