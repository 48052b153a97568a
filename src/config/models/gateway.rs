//! Top-level gateway configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Gateway configuration, one section per component
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl GatewayConfig {
    /// Overlay values from environment variables
    pub fn apply_env_overrides(&mut self) {
        if let Some(token) = non_empty_env("GITHUB_TOKEN") {
            self.upstream.token = Some(token);
        }
        if let Some(host) = non_empty_env("REPOMETA_HOST") {
            self.server.host = host;
        }
        if let Some(port) = non_empty_env("REPOMETA_PORT").and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}
