//! Lookup outcome types

use crate::core::github::RepoSummary;
use crate::core::rate_limiter::RateLimitResult;

pub const MISSING_REPO_MESSAGE: &str = "Missing 'repo' parameter";
pub const INVALID_REPO_MESSAGE: &str = "Invalid repository format. Use 'owner/repo' or GitHub URL";
pub const NOT_FOUND_MESSAGE: &str = "Repository not found or inaccessible";

/// Final classification of one lookup request
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    /// Repository found; `rate_limit` describes the caller's budget
    Ok {
        summary: RepoSummary,
        rate_limit: RateLimitResult,
    },
    /// Caller exceeded its budget; `retry_after_secs` is always set
    TooManyRequests(RateLimitResult),
    /// Missing or malformed identifier
    BadRequest(String),
    /// Upstream absent, throttled, failing or returned an invalid payload
    NotFound,
    /// The lookup itself broke down
    InternalError,
}

impl LookupOutcome {
    pub fn status_code(&self) -> u16 {
        match self {
            LookupOutcome::Ok { .. } => 200,
            LookupOutcome::TooManyRequests(_) => 429,
            LookupOutcome::BadRequest(_) => 400,
            LookupOutcome::NotFound => 404,
            LookupOutcome::InternalError => 500,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, LookupOutcome::Ok { .. })
    }
}
