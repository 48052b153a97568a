//! Repository identifier parsing
//!
//! Callers may name a repository either as `owner/name` or as a full web URL
//! (`https://github.com/owner/name`). Both normalize to the same [`RepoKey`].
//! Anything ambiguous is rejected outright.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use url::Url;

/// Web host accepted in repository URLs by default
pub const DEFAULT_WEB_HOST: &str = "github.com";

static SHORTHAND_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_.-]+/[A-Za-z0-9_.-]+$").expect("shorthand pattern is valid")
});

static SEGMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.-]+$").expect("segment pattern is valid"));

/// The identifier could not be turned into an `owner/name` key
///
/// Deliberately carries no reason: every malformation is reported the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid repository identifier")]
pub struct InvalidRepoKey;

/// Normalized `owner/name` repository key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoKey {
    full: String,
    split: usize,
}

impl RepoKey {
    /// Parse a shorthand or a `github.com` URL
    pub fn parse(input: &str) -> Result<Self, InvalidRepoKey> {
        Self::parse_for_host(input, DEFAULT_WEB_HOST)
    }

    /// Parse a shorthand or a URL whose host is exactly `web_host`
    pub fn parse_for_host(input: &str, web_host: &str) -> Result<Self, InvalidRepoKey> {
        let input = input.trim();

        if input.starts_with("http://") || input.starts_with("https://") {
            return Self::from_url(input, web_host);
        }

        if SHORTHAND_RE.is_match(input) {
            let split = input.find('/').ok_or(InvalidRepoKey)?;
            if is_dot_segment(&input[..split]) || is_dot_segment(&input[split + 1..]) {
                return Err(InvalidRepoKey);
            }
            return Ok(Self {
                full: input.to_string(),
                split,
            });
        }

        Err(InvalidRepoKey)
    }

    fn from_url(input: &str, web_host: &str) -> Result<Self, InvalidRepoKey> {
        let url = Url::parse(input).map_err(|_| InvalidRepoKey)?;

        if url.host_str() != Some(web_host) {
            return Err(InvalidRepoKey);
        }

        let path = url.path().trim_start_matches('/');
        let mut segments = path.split('/');
        let owner = segments.next().ok_or(InvalidRepoKey)?;
        let name = segments.next().ok_or(InvalidRepoKey)?;

        // "/owner/name/" leaves an empty third segment and is rejected too
        if segments.next().is_some() {
            return Err(InvalidRepoKey);
        }
        if !SEGMENT_RE.is_match(owner) || !SEGMENT_RE.is_match(name) {
            return Err(InvalidRepoKey);
        }
        if is_dot_segment(owner) || is_dot_segment(name) {
            return Err(InvalidRepoKey);
        }

        Ok(Self {
            full: format!("{}/{}", owner, name),
            split: owner.len(),
        })
    }

    pub fn owner(&self) -> &str {
        &self.full[..self.split]
    }

    pub fn name(&self) -> &str {
        &self.full[self.split + 1..]
    }

    pub fn as_str(&self) -> &str {
        &self.full
    }
}

/// `.` and `..` would be resolved as path navigation in the upstream URL
fn is_dot_segment(segment: &str) -> bool {
    matches!(segment, "." | "..")
}

impl FromStr for RepoKey {
    type Err = InvalidRepoKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RepoKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full)
    }
}

impl AsRef<str> for RepoKey {
    fn as_ref(&self) -> &str {
        &self.full
    }
}
