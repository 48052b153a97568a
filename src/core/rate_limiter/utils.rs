//! Utility functions for rate limiter

use super::limiter::RateLimiter;
use super::types::RateLimitResult;
use crate::core::clock::{add_saturating, ceil_secs_until};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

impl RateLimiter {
    /// Remove expired windows, returning how many were dropped
    pub async fn cleanup(&self) -> usize {
        let now = self.clock.now();

        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, window| !window.is_expired(now));
        before - entries.len()
    }

    /// Start background cleanup task
    pub fn start_cleanup_task(self: Arc<Self>, every: Duration) -> JoinHandle<()> {
        let limiter = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            loop {
                interval.tick().await;
                let removed = limiter.cleanup().await;
                if removed > 0 {
                    debug!("Rate limiter cleanup removed {} windows", removed);
                }
            }
        })
    }

    /// Current window for `key` without counting a request
    pub async fn status(&self, key: &str) -> RateLimitResult {
        let now = self.clock.now();
        let limit = self.config.requests_per_window;

        let entries = self.entries.read().await;
        match entries.get(key).filter(|w| self.config.enabled && !w.is_expired(now)) {
            Some(window) => {
                let allowed = window.count < limit;
                RateLimitResult {
                    allowed,
                    limit,
                    remaining: limit.saturating_sub(window.count),
                    reset_at: window.reset_at,
                    retry_after_secs: (!allowed)
                        .then(|| ceil_secs_until(now, window.reset_at).max(1)),
                }
            }
            None => RateLimitResult {
                allowed: true,
                limit,
                remaining: limit,
                reset_at: add_saturating(now, self.config.window()),
                retry_after_secs: None,
            },
        }
    }

    /// Number of clients with a stored window, expired or not
    pub async fn tracked_clients(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Check if rate limiting is enabled
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Get the configured limit
    pub fn limit(&self) -> u32 {
        self.config.requests_per_window
    }

    /// Get the configured window
    pub fn window(&self) -> Duration {
        self.config.window()
    }
}
