//! Lookup orchestration

use super::types::{INVALID_REPO_MESSAGE, LookupOutcome, MISSING_REPO_MESSAGE};
use crate::config::Config;
use crate::core::github::{GitHubRepo, RepoSource, RepoSummary, UpstreamError};
use crate::core::rate_limiter::RateLimiter;
use crate::core::repo_cache::{CacheLookup, CacheTtls, FetchOutcome, RepoCache};
use crate::core::repo_key::{DEFAULT_WEB_HOST, RepoKey};
use crate::utils::error::{GatewayError, Result};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Rate-limited, cached repository metadata lookups
#[derive(Clone)]
pub struct RepoMetadataService {
    limiter: Arc<RateLimiter>,
    cache: Arc<RepoCache>,
    source: Arc<dyn RepoSource>,
    ttls: CacheTtls,
    web_host: String,
}

impl RepoMetadataService {
    pub fn new(
        limiter: Arc<RateLimiter>,
        cache: Arc<RepoCache>,
        source: Arc<dyn RepoSource>,
        ttls: CacheTtls,
    ) -> Self {
        Self {
            limiter,
            cache,
            source,
            ttls,
            web_host: DEFAULT_WEB_HOST.to_string(),
        }
    }

    /// Wire up limiter, cache and TTLs from configuration
    pub fn from_config(config: &Config, source: Arc<dyn RepoSource>) -> Self {
        let limiter = Arc::new(RateLimiter::new(config.rate_limit().clone()));
        let cache = Arc::new(RepoCache::new(config.cache().soft_capacity));

        Self::new(limiter, cache, source, CacheTtls::from(config.cache()))
            .with_web_host(config.upstream().web_host.clone())
    }

    /// Accept repository URLs on a different web host
    pub fn with_web_host(mut self, web_host: impl Into<String>) -> Self {
        self.web_host = web_host.into();
        self
    }

    pub fn limiter(&self) -> &Arc<RateLimiter> {
        &self.limiter
    }

    pub fn cache(&self) -> &Arc<RepoCache> {
        &self.cache
    }

    /// Serve one lookup for `client_key`
    pub async fn lookup(&self, client_key: &str, repo: Option<&str>) -> LookupOutcome {
        let rate_limit = self.limiter.check(&format!("github:{}", client_key)).await;
        if !rate_limit.allowed {
            debug!("Rate limit exceeded for client {}", client_key);
            return LookupOutcome::TooManyRequests(rate_limit);
        }

        let input = match repo.map(str::trim).filter(|r| !r.is_empty()) {
            Some(input) => input,
            None => return LookupOutcome::BadRequest(MISSING_REPO_MESSAGE.to_string()),
        };

        let key = match RepoKey::parse_for_host(input, &self.web_host) {
            Ok(key) => key,
            Err(_) => {
                debug!("Rejected repository identifier: {:?}", input);
                return LookupOutcome::BadRequest(INVALID_REPO_MESSAGE.to_string());
            }
        };

        match self.fetch(&key).await {
            Ok(Some(repo)) => LookupOutcome::Ok {
                summary: RepoSummary::from(&repo),
                rate_limit,
            },
            Ok(None) => LookupOutcome::NotFound,
            Err(e) => {
                error!("Lookup for {} failed: {}", key, e);
                LookupOutcome::InternalError
            }
        }
    }

    /// Cached fetch; `None` means the upstream had nothing usable
    ///
    /// On a miss the upstream is called exactly once and the outcome stored
    /// with its TTL. Only a failure of the fetch task itself is an error.
    pub async fn fetch(&self, key: &RepoKey) -> Result<Option<GitHubRepo>> {
        let cache_key = format!("repo:{}", key);

        if let CacheLookup::Hit(payload) = self.cache.get(&cache_key).await {
            debug!("Cache hit for {}", cache_key);
            return Ok(payload);
        }

        // Write-back lives in the task so it still lands if the caller is dropped
        let source = self.source.clone();
        let cache = self.cache.clone();
        let ttls = self.ttls;
        let fetch_key = key.clone();
        let payload = tokio::spawn(async move {
            let (payload, outcome) = match source.fetch_repo(&fetch_key).await {
                Ok(repo) => (Some(repo), FetchOutcome::Success),
                Err(e) => {
                    log_upstream_failure(&fetch_key, &e);
                    (None, e.outcome())
                }
            };

            let ttl = ttls.for_outcome(outcome);
            debug!(
                "Caching {} as {} for {}s",
                cache_key,
                outcome.as_str(),
                ttl.as_secs()
            );
            cache.set(&cache_key, payload.clone(), ttl).await;
            payload
        })
        .await
        .map_err(|e| GatewayError::internal(format!("Upstream fetch task failed: {}", e)))?;

        Ok(payload)
    }
}

fn log_upstream_failure(key: &RepoKey, err: &UpstreamError) {
    match err.outcome() {
        FetchOutcome::NotFound | FetchOutcome::RateLimited => {
            warn!("GitHub API error for {}: {}", key, err)
        }
        _ => error!("Error fetching GitHub repo {}: {}", key, err),
    }
}
