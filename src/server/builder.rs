//! Server builder and run_server function
//!
//! This module provides the ServerBuilder for easier server configuration
//! and the run_server function used by the binary.

use crate::config::Config;
use crate::core::github::RepoSource;
use crate::core::service::RepoMetadataService;
use crate::server::server::HttpServer;
use crate::utils::error::{GatewayError, Result};
use std::sync::Arc;
use tracing::info;

/// Server builder for easier configuration
#[derive(Default)]
pub struct ServerBuilder {
    config: Option<Config>,
    source: Option<Arc<dyn RepoSource>>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Replace the GitHub client with another upstream
    pub fn with_source(mut self, source: Arc<dyn RepoSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Build the HTTP server
    pub async fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| GatewayError::Config("Configuration is required".to_string()))?;

        match self.source {
            Some(source) => {
                let service = RepoMetadataService::from_config(&config, source);
                Ok(HttpServer::with_service(&config, service))
            }
            None => HttpServer::new(&config).await,
        }
    }
}

/// Run the server with an already loaded configuration
pub async fn run_server(config: Config) -> Result<()> {
    info!("Starting repometa gateway");

    let server = ServerBuilder::new().with_config(config).build().await?;
    let server_config = server.config();
    info!(
        "Server starting at: http://{}:{}",
        server_config.host, server_config.port
    );
    info!("API Endpoints:");
    info!("   GET  /health - Health check");
    info!("   GET  /api/github?repo=owner/name - Repository metadata");

    server.start().await
}
