//! Rate limiter types and data structures

use chrono::{DateTime, Utc};

/// Rate limit decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitResult {
    /// Whether the request is allowed
    pub allowed: bool,
    /// Maximum requests allowed per window
    pub limit: u32,
    /// Remaining requests in the window
    pub remaining: u32,
    /// When the current window closes
    pub reset_at: DateTime<Utc>,
    /// Whole seconds to wait, only set when not allowed
    pub retry_after_secs: Option<u64>,
}

impl RateLimitResult {
    /// Reset time as Unix epoch milliseconds
    pub fn reset_at_millis(&self) -> i64 {
        self.reset_at.timestamp_millis()
    }
}

/// Counter for one client in its current window
#[derive(Debug, Clone)]
pub(super) struct ClientWindow {
    /// Requests counted in this window
    pub(super) count: u32,
    /// Instant the window closes
    pub(super) reset_at: DateTime<Utc>,
}

impl ClientWindow {
    pub(super) fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.reset_at
    }
}
