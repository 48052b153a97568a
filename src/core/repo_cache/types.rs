//! Cache types and TTL policy

use crate::config::models::cache::CacheConfig;
use crate::core::github::GitHubRepo;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// How an upstream fetch ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Validated payload
    Success,
    /// Upstream reported the repository missing
    NotFound,
    /// Upstream's own rate limit tripped
    RateLimited,
    /// Network, timeout, unexpected status or invalid payload
    Transient,
}

impl FetchOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchOutcome::Success => "success",
            FetchOutcome::NotFound => "not_found",
            FetchOutcome::RateLimited => "rate_limited",
            FetchOutcome::Transient => "transient",
        }
    }
}

/// Entry lifetime per fetch outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheTtls {
    pub success: Duration,
    pub not_found: Duration,
    pub rate_limited: Duration,
    pub transient: Duration,
}

impl CacheTtls {
    pub fn for_outcome(&self, outcome: FetchOutcome) -> Duration {
        match outcome {
            FetchOutcome::Success => self.success,
            FetchOutcome::NotFound => self.not_found,
            FetchOutcome::RateLimited => self.rate_limited,
            FetchOutcome::Transient => self.transient,
        }
    }
}

impl Default for CacheTtls {
    fn default() -> Self {
        Self::from(&CacheConfig::default())
    }
}

impl From<&CacheConfig> for CacheTtls {
    fn from(config: &CacheConfig) -> Self {
        Self {
            success: config.success_ttl(),
            not_found: config.not_found_ttl(),
            rate_limited: config.rate_limited_ttl(),
            transient: config.transient_ttl(),
        }
    }
}

/// Result of a cache read
#[derive(Debug, Clone, PartialEq)]
pub enum CacheLookup {
    /// Unexpired entry; `None` records a failed fetch
    Hit(Option<GitHubRepo>),
    /// No entry, or it expired
    Miss,
}

/// Stored outcome of one upstream fetch
#[derive(Debug, Clone)]
pub(super) struct CachedRepoEntry {
    pub(super) payload: Option<GitHubRepo>,
    pub(super) stored_at: DateTime<Utc>,
    pub(super) ttl: Duration,
}

impl CachedRepoEntry {
    pub(super) fn is_expired(&self, now: DateTime<Utc>) -> bool {
        let age = (now - self.stored_at).to_std().unwrap_or_default();
        age >= self.ttl
    }
}

/// Cache counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}
