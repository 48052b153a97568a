//! Repository metadata lookup
//!
//! Ties the rate limiter, the request gate, the fetch cache and the upstream
//! source together. Every request resolves to exactly one [`LookupOutcome`].

mod lookup;
mod types;


pub use lookup::RepoMetadataService;
pub use types::{INVALID_REPO_MESSAGE, LookupOutcome, MISSING_REPO_MESSAGE, NOT_FOUND_MESSAGE};
