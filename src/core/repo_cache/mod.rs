//! Repository fetch cache
//!
//! TTL-keyed store of upstream outcomes. Successful payloads live long;
//! not-found, upstream throttling and transient failures are remembered
//! briefly as "absent" so a failing repository is not hammered.

mod cache;
mod types;


pub use cache::RepoCache;
pub use types::{CacheLookup, CacheStats, CacheTtls, FetchOutcome};
