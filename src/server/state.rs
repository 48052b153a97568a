//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::core::service::RepoMetadataService;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// Built once at startup; every worker gets a clone of the same `Arc`s, so
/// the rate limiter and cache are process-wide.
#[derive(Clone)]
pub struct AppState {
    /// Gateway configuration (shared read-only)
    pub config: Arc<Config>,
    /// Repository lookup service
    pub service: Arc<RepoMetadataService>,
}

impl AppState {
    pub fn new(config: Config, service: RepoMetadataService) -> Self {
        Self {
            config: Arc::new(config),
            service: Arc::new(service),
        }
    }

    /// Get gateway configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
