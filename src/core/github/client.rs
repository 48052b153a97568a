//! GitHub REST client for repository metadata

use super::error::UpstreamError;
use super::types::GitHubRepo;
use crate::config::models::upstream::UpstreamConfig;
use crate::core::repo_key::RepoKey;
use crate::utils::error::{GatewayError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, HeaderMap, HeaderName, HeaderValue};
use tracing::{debug, warn};

const API_VERSION_HEADER: &str = "x-github-api-version";
const RATELIMIT_RESET_HEADER: &str = "x-ratelimit-reset";
const RATELIMIT_REMAINING_HEADER: &str = "x-ratelimit-remaining";

/// Anything that can answer "get repository metadata by owner/name"
#[async_trait]
pub trait RepoSource: Send + Sync {
    async fn fetch_repo(&self, key: &RepoKey) -> std::result::Result<GitHubRepo, UpstreamError>;
}

/// Client for `GET /repos/{owner}/{repo}`
#[derive(Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    api_base: String,
    token: Option<String>,
}

impl GitHubClient {
    /// Build a client from upstream configuration
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            HeaderName::from_static(API_VERSION_HEADER),
            HeaderValue::from_str(&config.api_version).map_err(|e| {
                GatewayError::config(format!("Invalid api_version header value: {}", e))
            })?,
        );

        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            token: config.token.clone().filter(|t| !t.is_empty()),
        })
    }

    fn repo_url(&self, key: &RepoKey) -> String {
        format!("{}/repos/{}/{}", self.api_base, key.owner(), key.name())
    }
}

#[async_trait]
impl RepoSource for GitHubClient {
    async fn fetch_repo(&self, key: &RepoKey) -> std::result::Result<GitHubRepo, UpstreamError> {
        let url = self.repo_url(key);
        debug!("Fetching repository metadata: {}", url);

        let mut request = self.http.get(&url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            return GitHubRepo::from_json(&body);
        }

        let reset_at = ratelimit_reset(response.headers());
        let remaining = header_str(response.headers(), RATELIMIT_REMAINING_HEADER);
        let body = response.text().await.unwrap_or_default();

        match status {
            StatusCode::NOT_FOUND => Err(UpstreamError::NotFound(key.to_string())),
            StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => {
                warn!(
                    repo = %key,
                    status = status.as_u16(),
                    remaining = remaining.as_deref().unwrap_or("?"),
                    reset_at = ?reset_at,
                    "GitHub API rate limit response"
                );
                Err(UpstreamError::RateLimited {
                    status: status.as_u16(),
                    reset_at,
                })
            }
            _ => Err(UpstreamError::Status {
                status: status.as_u16(),
                body: truncate(&body, 512),
            }),
        }
    }
}

fn header_str(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}

/// Parse the upstream's own window reset (epoch seconds)
fn ratelimit_reset(headers: &HeaderMap) -> Option<DateTime<Utc>> {
    header_str(headers, RATELIMIT_RESET_HEADER)
        .and_then(|v| v.trim().parse::<i64>().ok())
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
}

fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}
