//! Scheduled capture worker binary.

use std::time::Duration;

use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use aircheck_models::{DurationField, TriggerRequest};
use aircheck_worker::{Scheduler, WorkerConfig};

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("aircheck=info".parse().unwrap());

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    info!("Starting aircheck-worker");

    let config = WorkerConfig::from_env();
    info!("Worker config: {:?}", config);

    let trigger = match trigger_from_env() {
        Ok(t) => t,
        Err(e) => {
            error!("Invalid capture trigger configuration: {}", e);
            std::process::exit(1);
        }
    };

    let interval_secs = std::env::var("AIRCHECK_INTERVAL_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(3600);

    let scheduler = match Scheduler::new(config, &trigger, Duration::from_secs(interval_secs)) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to register capture trigger: {}", e);
            std::process::exit(1);
        }
    };

    // Setup signal handler
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("Received shutdown signal");
        let _ = shutdown_tx.send(true);
    });

    scheduler.run(shutdown_rx).await;

    info!("Worker shutdown complete");
}

fn trigger_from_env() -> Result<TriggerRequest, String> {
    let stream_url = std::env::var("AIRCHECK_STREAM_URL")
        .map_err(|_| "AIRCHECK_STREAM_URL not set".to_string())?;
    let rec_timeout = std::env::var("AIRCHECK_DURATION_SECS")
        .map_err(|_| "AIRCHECK_DURATION_SECS not set".to_string())?;
    let store_location = std::env::var("AIRCHECK_DESTINATION")
        .map_err(|_| "AIRCHECK_DESTINATION not set".to_string())?;

    Ok(TriggerRequest {
        stream_url,
        rec_timeout: DurationField::Text(rec_timeout),
        store_location,
    })
}
