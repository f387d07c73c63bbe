//! HTTP trigger for capture jobs.
//!
//! Thin glue over the worker: parse a trigger request, reject malformed
//! input with a 400, fire the job, reply 202. The pipeline itself lives in
//! `aircheck-worker`.

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
