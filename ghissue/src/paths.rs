//! # Repository Identifiers and API Paths
//!
//! [`RepoId`] is the validated `owner/repo` pair every issue operation is
//! scoped to. [`ApiPath`] builds request paths from individual segments and
//! percent-encodes them when joined onto the base URL, so user-supplied
//! values such as label names can never change the shape of the path.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use url::Url;

use crate::error::ApiError;

static SEGMENT_REGEX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.-]+$").expect("Failed to compile repository segment regex"));

static GITHUB_REPO_REGEX: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"github\.com[/:]([^/]+)/([^/]+?)(?:\.git)?(?:[/#?].*)?$").expect("Failed to compile GitHub repo regex")
});

/// Errors raised when an owner or repository name is not usable in a path
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepoIdError {
  #[error("Invalid {kind} name: '{value}'")]
  InvalidSegment { kind: &'static str, value: String },
  #[error("Expected 'owner/repo', got '{0}'")]
  InvalidFormat(String),
  #[error("Could not extract owner and repo from URL: {0}")]
  InvalidUrl(String),
}

/// An `owner/repo` pair identifying a GitHub repository
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoId {
  owner: String,
  repo: String,
}

impl RepoId {
  /// Create a repository identifier, validating both segments.
  pub fn new(owner: &str, repo: &str) -> Result<Self, RepoIdError> {
    validate_segment("owner", owner)?;
    validate_segment("repository", repo)?;
    Ok(Self {
      owner: owner.to_string(),
      repo: repo.to_string(),
    })
  }

  /// Extract owner and repo from a GitHub URL
  pub fn from_url(url: &str) -> Result<Self, RepoIdError> {
    // Match patterns like:
    // https://github.com/owner/repo
    // https://github.com/owner/repo.git
    // git@github.com:owner/repo.git
    // https://github.com/owner/repo/issues/123
    let captures = GITHUB_REPO_REGEX
      .captures(url)
      .ok_or_else(|| RepoIdError::InvalidUrl(url.to_string()))?;
    match (captures.get(1), captures.get(2)) {
      (Some(owner), Some(repo)) => Self::new(owner.as_str(), repo.as_str()),
      _ => Err(RepoIdError::InvalidUrl(url.to_string())),
    }
  }

  pub fn owner(&self) -> &str {
    &self.owner
  }

  pub fn repo(&self) -> &str {
    &self.repo
  }

  /// `/repos/{owner}/{repo}`
  pub fn path(&self) -> ApiPath {
    ApiPath::root().segment("repos").segment(&self.owner).segment(&self.repo)
  }
}

impl FromStr for RepoId {
  type Err = RepoIdError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.split_once('/') {
      Some((owner, repo)) if !repo.contains('/') => Self::new(owner, repo),
      _ => Err(RepoIdError::InvalidFormat(s.to_string())),
    }
  }
}

impl fmt::Display for RepoId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}/{}", self.owner, self.repo)
  }
}

fn validate_segment(kind: &'static str, value: &str) -> Result<(), RepoIdError> {
  if value == "." || value == ".." || !SEGMENT_REGEX.is_match(value) {
    return Err(RepoIdError::InvalidSegment {
      kind,
      value: value.to_string(),
    });
  }
  Ok(())
}

/// A request path relative to the API base URL
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiPath {
  segments: Vec<String>,
}

impl ApiPath {
  pub fn root() -> Self {
    Self::default()
  }

  /// Append one raw segment. Reserved characters are encoded on join.
  pub fn segment(mut self, segment: impl Into<String>) -> Self {
    self.segments.push(segment.into());
    self
  }

  /// Append a numeric identifier (issue number, comment id, ...)
  pub fn id(self, id: u64) -> Self {
    self.segment(id.to_string())
  }

  pub fn segments(&self) -> &[String] {
    &self.segments
  }

  /// Resolve the path against `base`, keeping any path prefix the base
  /// already carries (GitHub Enterprise serves the API under `/api/v3`).
  ///
  /// `.` and `..` segments are rejected; URL normalisation would drop them
  /// and address a different resource.
  pub fn to_url(&self, base: &Url) -> Result<Url, ApiError> {
    if let Some(dot) = self.segments.iter().find(|s| matches!(s.as_str(), "." | "..")) {
      return Err(ApiError::InvalidRequest(format!(
        "Path segment '{dot}' is not allowed in {self}"
      )));
    }
    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);
    {
      let mut path = url
        .path_segments_mut()
        .map_err(|()| ApiError::InvalidRequest(format!("Base URL cannot carry a path: {base}")))?;
      path.pop_if_empty();
      path.extend(&self.segments);
    }
    Ok(url)
  }
}

impl fmt::Display for ApiPath {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.segments.is_empty() {
      return f.write_str("/");
    }
    for segment in &self.segments {
      write!(f, "/{segment}")?;
    }
    Ok(())
  }
}
