//! Upstream error types

use crate::core::repo_cache::FetchOutcome;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur when fetching repository metadata
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Repository not found: {0}")]
    NotFound(String),

    #[error("GitHub rate limit exceeded (status {status})")]
    RateLimited {
        status: u16,
        reset_at: Option<DateTime<Utc>>,
    },

    #[error("GitHub API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid repository payload: {0}")]
    Validation(String),
}

impl UpstreamError {
    /// Outcome class used to pick the cache TTL
    pub fn outcome(&self) -> FetchOutcome {
        match self {
            UpstreamError::NotFound(_) => FetchOutcome::NotFound,
            UpstreamError::RateLimited { .. } => FetchOutcome::RateLimited,
            UpstreamError::Status { .. }
            | UpstreamError::Network(_)
            | UpstreamError::Validation(_) => FetchOutcome::Transient,
        }
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            UpstreamError::Network(format!("request timed out: {}", e))
        } else if e.is_decode() {
            UpstreamError::Validation(e.to_string())
        } else {
            UpstreamError::Network(e.to_string())
        }
    }
}

impl From<serde_json::Error> for UpstreamError {
    fn from(e: serde_json::Error) -> Self {
        UpstreamError::Validation(e.to_string())
    }
}
