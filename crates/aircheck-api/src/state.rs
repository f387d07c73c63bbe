//! Application state.

use aircheck_worker::WorkerConfig;

use crate::config::ApiConfig;

/// Shared state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Server configuration
    pub config: ApiConfig,
    /// Pipeline configuration jobs are built against
    pub worker: WorkerConfig,
}

impl AppState {
    /// Create application state.
    pub fn new(config: ApiConfig, worker: WorkerConfig) -> Self {
        Self { config, worker }
    }
}
