//! GitHub repository metadata upstream
//!
//! Typed model of the `GET /repos/{owner}/{repo}` response, the outward
//! summary derived from it, and the HTTP client that fetches it.

mod client;
mod error;
mod types;

pub use client::{GitHubClient, RepoSource};
pub use error::UpstreamError;
pub use types::{GitHubRepo, License, RepoSummary};
