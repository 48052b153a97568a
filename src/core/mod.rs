//! Core functionality for the gateway
//!
//! Rate limiting, identifier parsing, the repository cache, the GitHub
//! upstream and the lookup orchestration that ties them together.

pub mod clock;
pub mod github;
pub mod rate_limiter; // Per-client fixed windows
pub mod repo_cache;
pub mod repo_key;
pub mod service;

pub use clock::{Clock, ManualClock, SharedClock, SystemClock};
pub use repo_key::{InvalidRepoKey, RepoKey};
pub use service::{LookupOutcome, RepoMetadataService};
