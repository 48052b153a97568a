//! GitHub repository payload types

use super::error::UpstreamError;
use serde::{Deserialize, Deserializer, Serialize};

/// Validated repository record as returned by the upstream API
///
/// Fields without `#[serde(default)]` must be present in the payload; nullable
/// ones may hold `null` but may not be omitted. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GitHubRepo {
    pub full_name: String,
    #[serde(deserialize_with = "nullable")]
    pub description: Option<String>,
    pub stargazers_count: u64,
    pub forks_count: u64,
    #[serde(deserialize_with = "nullable")]
    pub language: Option<String>,
    pub html_url: String,
    #[serde(deserialize_with = "nullable")]
    pub homepage: Option<String>,
    pub pushed_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub topics: Option<Vec<String>>,
    #[serde(default)]
    pub license: Option<License>,
    #[serde(default)]
    pub open_issues_count: Option<u64>,
}

/// Repository license
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct License {
    pub name: String,
    #[serde(default)]
    pub spdx_id: Option<String>,
}

/// Requires the key to be present while still accepting `null`
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer)
}

impl GitHubRepo {
    /// Decode and validate a raw response body
    pub fn from_json(body: &str) -> Result<Self, UpstreamError> {
        let repo: GitHubRepo = serde_json::from_str(body)?;
        repo.validate()?;
        Ok(repo)
    }

    /// Checks the type system cannot express
    pub fn validate(&self) -> Result<(), UpstreamError> {
        url::Url::parse(&self.html_url).map_err(|e| {
            UpstreamError::Validation(format!("html_url '{}' is not a URL: {}", self.html_url, e))
        })?;
        Ok(())
    }
}

/// Repository metadata exposed to callers
///
/// Every field is populated; optional upstream fields fall back to empty
/// values, `"Unknown"` for the language and `null` for the license.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoSummary {
    pub full_name: String,
    pub description: String,
    pub stargazers_count: u64,
    pub forks_count: u64,
    pub language: String,
    pub html_url: String,
    pub homepage: String,
    pub pushed_at: String,
    pub updated_at: String,
    pub topics: Vec<String>,
    pub license: Option<String>,
    pub open_issues_count: u64,
}

fn or_default(value: &Option<String>, fallback: &str) -> String {
    match value.as_deref() {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => fallback.to_string(),
    }
}

impl From<&GitHubRepo> for RepoSummary {
    fn from(repo: &GitHubRepo) -> Self {
        Self {
            full_name: repo.full_name.clone(),
            description: or_default(&repo.description, ""),
            stargazers_count: repo.stargazers_count,
            forks_count: repo.forks_count,
            language: or_default(&repo.language, "Unknown"),
            html_url: repo.html_url.clone(),
            homepage: or_default(&repo.homepage, ""),
            pushed_at: repo.pushed_at.clone(),
            updated_at: repo.updated_at.clone(),
            topics: repo.topics.clone().unwrap_or_default(),
            license: repo
                .license
                .as_ref()
                .map(|l| l.name.clone())
                .filter(|name| !name.is_empty()),
            open_issues_count: repo.open_issues_count.unwrap_or(0),
        }
    }
}
