//! Rate limiting configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Per-client fixed-window rate limiting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Enable rate limiting
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Requests admitted per client per window
    #[serde(default = "default_requests_per_window")]
    pub requests_per_window: u32,
    /// Window length in seconds
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
    /// Tracked-client count above which expired windows are swept on write
    #[serde(default = "default_max_tracked_clients")]
    pub max_tracked_clients: usize,
    /// Interval of the background sweep in seconds (0 disables it)
    #[serde(default = "default_cleanup_interval_secs")]
    pub cleanup_interval_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            requests_per_window: default_requests_per_window(),
            window_secs: default_window_secs(),
            max_tracked_clients: default_max_tracked_clients(),
            cleanup_interval_secs: default_cleanup_interval_secs(),
        }
    }
}

impl RateLimitConfig {
    /// Window length
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }

    /// Validate rate limit configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.requests_per_window == 0 {
            return Err("requests_per_window must be greater than 0".to_string());
        }
        if self.window_secs == 0 {
            return Err("window_secs must be greater than 0".to_string());
        }
        if self.max_tracked_clients == 0 {
            return Err("max_tracked_clients must be greater than 0".to_string());
        }
        Ok(())
    }
}
