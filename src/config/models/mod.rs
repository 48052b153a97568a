//! Configuration data models
//!
//! This module defines all configuration structures used throughout the gateway.

pub mod cache;
pub mod gateway;
pub mod logging;
pub mod rate_limit;
pub mod server;
pub mod upstream;

pub use cache::*;
pub use gateway::*;
pub use logging::*;
pub use rate_limit::*;
pub use server::*;
pub use upstream::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8000
}

pub fn default_true() -> bool {
    true
}

pub fn default_requests_per_window() -> u32 {
    60
}

pub fn default_window_secs() -> u64 {
    60
}

pub fn default_max_tracked_clients() -> usize {
    10_000
}

pub fn default_cleanup_interval_secs() -> u64 {
    60
}

pub fn default_success_ttl_secs() -> u64 {
    3600 // 1 hour
}

pub fn default_not_found_ttl_secs() -> u64 {
    300 // 5 minutes
}

pub fn default_rate_limited_ttl_secs() -> u64 {
    60
}

pub fn default_transient_ttl_secs() -> u64 {
    60
}

pub fn default_soft_capacity() -> usize {
    100
}

pub fn default_api_base() -> String {
    "https://api.github.com".to_string()
}

pub fn default_web_host() -> String {
    "github.com".to_string()
}

pub fn default_user_agent() -> String {
    "repometa-gateway/1.0".to_string()
}

pub fn default_api_version() -> String {
    "2022-11-28".to_string()
}

pub fn default_upstream_timeout_secs() -> u64 {
    10
}

pub fn default_log_level() -> String {
    "info".to_string()
}
