//! HTTP server core implementation
//!
//! This module provides the HttpServer struct and its core methods.

use crate::config::{Config, ServerConfig};
use crate::core::github::GitHubClient;
use crate::core::service::RepoMetadataService;
use crate::server::middleware::RequestIdMiddleware;
use crate::server::routes;
use crate::server::state::AppState;
use crate::utils::error::{GatewayError, Result};
use actix_web::{App, HttpServer as ActixHttpServer, middleware::DefaultHeaders, web};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_actix_web::TracingLogger;

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Cleanup cadence for idle rate limit windows
    cleanup_interval: Duration,
    /// Application state
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server backed by the GitHub API
    pub async fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");

        let client = GitHubClient::new(config.upstream())?;
        let service = RepoMetadataService::from_config(config, Arc::new(client));

        Ok(Self::with_service(config, service))
    }

    /// Create a server around an already wired service
    pub fn with_service(config: &Config, service: RepoMetadataService) -> Self {
        Self {
            config: config.server().clone(),
            cleanup_interval: Duration::from_secs(config.rate_limit().cleanup_interval_secs),
            state: AppState::new(config.clone(), service),
        }
    }

    /// Create the Actix-web application
    pub fn create_app(
        state: web::Data<AppState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(state)
            .wrap(TracingLogger::default())
            .wrap(RequestIdMiddleware)
            .wrap(DefaultHeaders::new().add(("Server", "repometa-gateway")))
            .configure(routes::configure_routes)
    }

    /// Start the HTTP server
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.address();
        let workers = self.config.worker_count();

        info!("Starting HTTP server on {} with {} workers", bind_addr, workers);

        let limiter = self.state.service.limiter().clone();
        let cleanup_task = if limiter.is_enabled() {
            Some(limiter.start_cleanup_task(self.cleanup_interval))
        } else {
            None
        };

        let state = web::Data::new(self.state);

        let server = ActixHttpServer::new(move || Self::create_app(state.clone()))
            .workers(workers)
            .bind(&bind_addr)
            .map_err(|e| GatewayError::server(format!("Failed to bind to {}: {}", bind_addr, e)))?
            .run();

        info!("HTTP server listening on {}", bind_addr);

        let result = server
            .await
            .map_err(|e| GatewayError::server(format!("Server error: {}", e)));

        if let Some(task) = cleanup_task {
            task.abort();
        }

        result?;
        info!("HTTP server stopped");
        Ok(())
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}
