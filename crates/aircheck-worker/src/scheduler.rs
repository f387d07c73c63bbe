//! Interval trigger: fires one capture job per tick.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::info;

use aircheck_models::{CaptureSpec, ModelResult, TriggerRequest};
use aircheck_storage::{FtpStore, RemoteStore};

use crate::config::WorkerConfig;
use crate::job::CaptureJob;

/// Fires one capture job per tick of a fixed interval.
///
/// The trigger request is validated at construction; a malformed duration or
/// destination aborts registration instead of surfacing later inside a job.
/// The remote location is parsed once here and reused across every firing.
pub struct Scheduler {
    config: WorkerConfig,
    stream_url: String,
    duration_secs: u64,
    store: Arc<dyn RemoteStore>,
    interval: Duration,
}

impl Scheduler {
    /// Create a scheduler for a trigger request.
    pub fn new(
        config: WorkerConfig,
        trigger: &TriggerRequest,
        interval: Duration,
    ) -> ModelResult<Self> {
        let parsed = trigger.validate()?;
        let store =
            FtpStore::new(parsed.location).with_connect_timeout(config.connect_timeout);
        Ok(Self {
            config,
            stream_url: parsed.stream_url,
            duration_secs: parsed.duration_secs,
            store: Arc::new(store),
            interval,
        })
    }

    /// Run until the shutdown signal flips.
    ///
    /// The first job fires immediately, then one per interval. Jobs run as
    /// detached tasks; a slow delivery never delays the next firing.
    pub async fn run(&self, mut shutdown_rx: watch::Receiver<bool>) {
        info!(
            "Scheduler firing every {}s against {}",
            self.interval.as_secs(),
            self.store.destination()
        );

        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = shutdown_rx.changed() => {
                    if *shutdown_rx.borrow() {
                        info!("Shutdown signal received, stopping scheduler");
                        break;
                    }
                }
                _ = interval.tick() => {
                    let job = self.job();
                    info!(job_id = %job.id(), "Trigger fired");
                    tokio::spawn(async move {
                        job.run().await;
                    });
                }
            }
        }
    }

    fn job(&self) -> CaptureJob {
        let spec = CaptureSpec::new(
            self.stream_url.clone(),
            self.duration_secs,
            &self.config.encoder,
        );
        CaptureJob::new(spec, self.config.scratch_dir.clone(), Arc::clone(&self.store))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aircheck_models::DurationField;

    fn trigger(rec_timeout: &str, store_location: &str) -> TriggerRequest {
        TriggerRequest {
            stream_url: "http://radio.test/live".to_string(),
            rec_timeout: DurationField::Text(rec_timeout.to_string()),
            store_location: store_location.to_string(),
        }
    }

    #[tokio::test]
    async fn test_registration_rejects_malformed_duration() {
        let result = Scheduler::new(
            WorkerConfig::default(),
            &trigger("abc", "ftp://u:p@host/a"),
            Duration::from_secs(60),
        );
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_registration_rejects_malformed_destination() {
        let result = Scheduler::new(
            WorkerConfig::default(),
            &trigger("10", "host-without-credentials/a"),
            Duration::from_secs(60),
        );
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_registration_accepts_valid_trigger() {
        let scheduler = Scheduler::new(
            WorkerConfig::default(),
            &trigger("10", "ftp://u:p@host/a"),
            Duration::from_secs(60),
        )
        .unwrap();
        assert_eq!(scheduler.duration_secs, 10);
    }
}
