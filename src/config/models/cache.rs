//! Repository cache configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Repository cache configuration
///
/// Entry lifetime depends on how the upstream call ended, so each outcome
/// has its own TTL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// TTL for validated repository payloads
    #[serde(default = "default_success_ttl_secs")]
    pub success_ttl_secs: u64,
    /// TTL for repositories the upstream reported as missing
    #[serde(default = "default_not_found_ttl_secs")]
    pub not_found_ttl_secs: u64,
    /// TTL after the upstream's own rate limit tripped
    #[serde(default = "default_rate_limited_ttl_secs")]
    pub rate_limited_ttl_secs: u64,
    /// TTL for network, status and payload failures
    #[serde(default = "default_transient_ttl_secs")]
    pub transient_ttl_secs: u64,
    /// Entry count above which expired entries are swept on write
    #[serde(default = "default_soft_capacity")]
    pub soft_capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            success_ttl_secs: default_success_ttl_secs(),
            not_found_ttl_secs: default_not_found_ttl_secs(),
            rate_limited_ttl_secs: default_rate_limited_ttl_secs(),
            transient_ttl_secs: default_transient_ttl_secs(),
            soft_capacity: default_soft_capacity(),
        }
    }
}

impl CacheConfig {
    pub fn success_ttl(&self) -> Duration {
        Duration::from_secs(self.success_ttl_secs)
    }

    pub fn not_found_ttl(&self) -> Duration {
        Duration::from_secs(self.not_found_ttl_secs)
    }

    pub fn rate_limited_ttl(&self) -> Duration {
        Duration::from_secs(self.rate_limited_ttl_secs)
    }

    pub fn transient_ttl(&self) -> Duration {
        Duration::from_secs(self.transient_ttl_secs)
    }

    /// Validate cache configuration
    ///
    /// Failure TTLs must be non-zero and strictly shorter than the success TTL.
    pub fn validate(&self) -> Result<(), String> {
        let failures = [
            ("not_found_ttl_secs", self.not_found_ttl_secs),
            ("rate_limited_ttl_secs", self.rate_limited_ttl_secs),
            ("transient_ttl_secs", self.transient_ttl_secs),
        ];

        for (name, ttl) in failures {
            if ttl == 0 {
                return Err(format!("{} must be greater than 0", name));
            }
            if ttl >= self.success_ttl_secs {
                return Err(format!(
                    "{} ({}) must be shorter than success_ttl_secs ({})",
                    name, ttl, self.success_ttl_secs
                ));
            }
        }

        if self.soft_capacity == 0 {
            return Err("soft_capacity must be greater than 0".to_string());
        }

        Ok(())
    }
}
