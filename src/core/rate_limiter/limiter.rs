//! Core rate limiter implementation

use super::types::{ClientWindow, RateLimitResult};
use crate::config::models::rate_limit::RateLimitConfig;
use crate::core::clock::{SharedClock, SystemClock, add_saturating, ceil_secs_until};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::debug;

/// Fixed-window rate limiter
pub struct RateLimiter {
    /// Rate limit configuration
    pub(super) config: RateLimitConfig,
    /// Windows by client key
    pub(super) entries: Arc<RwLock<HashMap<String, ClientWindow>>>,
    /// Time source
    pub(super) clock: SharedClock,
    /// Map size that triggers the next opportunistic sweep
    pub(super) sweep_at: Arc<AtomicUsize>,
}

impl RateLimiter {
    /// Create a new rate limiter on the system clock
    pub fn new(config: RateLimitConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create a rate limiter reading time from `clock`
    pub fn with_clock(config: RateLimitConfig, clock: SharedClock) -> Self {
        Self {
            sweep_at: Arc::new(AtomicUsize::new(config.max_tracked_clients)),
            config,
            entries: Arc::new(RwLock::new(HashMap::new())),
            clock,
        }
    }

    /// Count a request against `key` using the configured limit and window
    pub async fn check(&self, key: &str) -> RateLimitResult {
        self.check_with(key, self.config.requests_per_window, self.config.window())
            .await
    }

    /// Count a request against `key` with an explicit limit and window
    ///
    /// Observing and incrementing the counter happen under one write lock, so
    /// concurrent callers can never push a window past `limit`.
    pub async fn check_with(&self, key: &str, limit: u32, window: Duration) -> RateLimitResult {
        let now = self.clock.now();

        if !self.config.enabled {
            return RateLimitResult {
                allowed: true,
                limit,
                remaining: limit,
                reset_at: add_saturating(now, window),
                retry_after_secs: None,
            };
        }

        let mut entries = self.entries.write().await;

        // Avoid String allocation if key already exists
        let entry = match entries.get_mut(key) {
            Some(entry) if !entry.is_expired(now) => entry,
            Some(entry) => {
                *entry = ClientWindow {
                    count: 1,
                    reset_at: add_saturating(now, window),
                };
                return Self::allowed(limit, entry);
            }
            None => {
                let fresh = ClientWindow {
                    count: 1,
                    reset_at: add_saturating(now, window),
                };
                let result = Self::allowed(limit, &fresh);
                entries.insert(key.to_string(), fresh);

                if entries.len() > self.sweep_at.load(Ordering::Relaxed) {
                    let before = entries.len();
                    entries.retain(|_, window| !window.is_expired(now));
                    let kept = entries.len();
                    debug!("Swept {} expired rate limit windows", before - kept);

                    // Live windows survive a sweep; wait for 50% growth before the next one
                    self.sweep_at.store(
                        self.config.max_tracked_clients.max(kept + kept / 2),
                        Ordering::Relaxed,
                    );
                }
                return result;
            }
        };

        if entry.count >= limit {
            let retry_after = ceil_secs_until(now, entry.reset_at).max(1);
            debug!(
                "Rate limit exceeded for {}: {}/{} requests, retry in {}s",
                key, entry.count, limit, retry_after
            );
            return RateLimitResult {
                allowed: false,
                limit,
                remaining: 0,
                reset_at: entry.reset_at,
                retry_after_secs: Some(retry_after),
            };
        }

        entry.count += 1;
        Self::allowed(limit, entry)
    }

    fn allowed(limit: u32, window: &ClientWindow) -> RateLimitResult {
        RateLimitResult {
            allowed: true,
            limit,
            remaining: limit.saturating_sub(window.count),
            reset_at: window.reset_at,
            retry_after_secs: None,
        }
    }
}

impl Clone for RateLimiter {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            entries: self.entries.clone(),
            clock: self.clock.clone(),
            sweep_at: self.sweep_at.clone(),
        }
    }
}
