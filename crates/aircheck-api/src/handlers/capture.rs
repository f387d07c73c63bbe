//! Capture trigger handler.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tracing::info;

use aircheck_models::TriggerRequest;
use aircheck_worker::CaptureJob;

use crate::error::ApiResult;
use crate::state::AppState;

/// Response for an accepted capture trigger.
#[derive(Serialize)]
pub struct CaptureAccepted {
    pub job_id: String,
    pub status: &'static str,
}

/// Fire one capture job from a trigger request.
///
/// The request is validated here, at the trigger boundary; malformed
/// durations or destinations come back as a 400. The job itself runs
/// fire-and-forget and reports through logs; its failure is terminal for
/// that invocation only, never for the server.
pub async fn trigger_capture(
    State(state): State<AppState>,
    Json(request): Json<TriggerRequest>,
) -> ApiResult<(StatusCode, Json<CaptureAccepted>)> {
    let job = CaptureJob::from_trigger(&request, &state.worker)?;
    let job_id = job.id().to_string();

    info!(job_id = %job_id, "Accepted capture trigger for {}", request.stream_url);
    tokio::spawn(async move {
        job.run().await;
    });

    Ok((
        StatusCode::ACCEPTED,
        Json(CaptureAccepted {
            job_id,
            status: "accepted",
        }),
    ))
}
