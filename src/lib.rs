//! # repometa-gateway
//!
//! Rate-limited, cached gateway in front of the GitHub repository metadata API.
//!
//! ## Features
//!
//! - **Per-client rate limiting**: fixed windows keyed by client address
//! - **Outcome-aware caching**: long TTLs for hits, short ones for failures
//! - **Strict input gate**: `owner/name` or `https://github.com/owner/name` only
//! - **Validated upstream payloads**: malformed responses never reach callers
//!
//! ## Embedding the lookup service
//!
//! ```rust,no_run
//! use repometa_gateway::core::github::GitHubClient;
//! use repometa_gateway::{Config, LookupOutcome, RepoMetadataService};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let client = GitHubClient::new(config.upstream())?;
//!     let service = RepoMetadataService::from_config(&config, Arc::new(client));
//!
//!     if let LookupOutcome::Ok { summary, .. } =
//!         service.lookup("127.0.0.1", Some("rust-lang/rust")).await
//!     {
//!         println!("{} has {} stars", summary.full_name, summary.stargazers_count);
//!     }
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod server;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use core::service::{LookupOutcome, RepoMetadataService};
pub use utils::error::{GatewayError, Result};

/// Current version of the gateway
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Git commit the binary was built from
pub const GIT_HASH: &str = env!("GIT_HASH");

/// Build information
#[derive(Debug, Clone, serde::Serialize)]
pub struct BuildInfo {
    pub version: &'static str,
    pub name: &'static str,
    pub git_hash: &'static str,
}

/// Get build information
pub fn build_info() -> BuildInfo {
    BuildInfo {
        version: VERSION,
        name: NAME,
        git_hash: GIT_HASH,
    }
}
