//! Upstream (GitHub API) configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// GitHub REST API client configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the REST API
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Host accepted in repository URLs supplied by callers
    #[serde(default = "default_web_host")]
    pub web_host: String,
    /// Optional bearer token
    #[serde(default)]
    pub token: Option<String>,
    /// User-Agent sent upstream
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Value of the X-GitHub-Api-Version header
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// Request timeout in seconds
    #[serde(default = "default_upstream_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            web_host: default_web_host(),
            token: None,
            user_agent: default_user_agent(),
            api_version: default_api_version(),
            timeout_secs: default_upstream_timeout_secs(),
        }
    }
}

// Keeps the token out of logs
impl std::fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("api_base", &self.api_base)
            .field("web_host", &self.web_host)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("user_agent", &self.user_agent)
            .field("api_version", &self.api_version)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate upstream configuration
    pub fn validate(&self) -> Result<(), String> {
        url::Url::parse(&self.api_base)
            .map_err(|e| format!("Invalid api_base '{}': {}", self.api_base, e))?;

        if self.web_host.trim().is_empty() {
            return Err("web_host cannot be empty".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }
        if self.user_agent.trim().is_empty() {
            return Err("user_agent cannot be empty".to_string());
        }
        Ok(())
    }
}
