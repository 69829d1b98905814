//! # Configuration Management
//!
//! Client settings loaded from `config.toml` in the platform configuration
//! directory, with environment overrides for the API URL and the default
//! repository. A missing file means defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::consts::{API_BASE_URL, ENV_API_URL, ENV_REPO};
use crate::paths::RepoId;

/// Represents the configuration directories for ghissue
#[derive(Debug, Clone)]
pub struct ConfigDirs {
  pub config_dir: PathBuf,
}

impl ConfigDirs {
  /// Resolve the platform configuration directory
  pub fn new() -> Result<Self> {
    let proj_dirs = ProjectDirs::from("", "", "ghissue").context("Failed to determine project directories")?;

    Ok(Self {
      config_dir: proj_dirs.config_dir().to_path_buf(),
    })
  }

  /// Get the path to the configuration file
  pub fn config_path(&self) -> PathBuf {
    self.config_dir.join("config.toml")
  }

  /// Load the configuration file, applying environment overrides
  pub fn load_config(&self) -> Result<ClientConfig> {
    let mut config = ClientConfig::load_from(&self.config_path())?;
    config.apply_env(|name| std::env::var(name).ok())?;
    Ok(config)
  }
}

/// When to resend a request that failed without a usable answer.
///
/// Only transport failures and 5xx responses are retried; 4xx responses
/// never are. The default performs no retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
  pub max_retries: u32,
  pub backoff_ms: u64,
}

impl Default for RetryPolicy {
  fn default() -> Self {
    Self {
      max_retries: 0,
      backoff_ms: 500,
    }
  }
}

impl RetryPolicy {
  pub const fn none() -> Self {
    Self {
      max_retries: 0,
      backoff_ms: 0,
    }
  }

  /// Linear backoff: the n-th retry waits `n * backoff_ms`.
  pub fn delay_for(&self, attempt: u32) -> Duration {
    Duration::from_millis(self.backoff_ms.saturating_mul(u64::from(attempt)))
  }
}

/// Settings for [`crate::GitHubClient`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
  /// API root, e.g. `https://ghe.example.com/api/v3` for GitHub Enterprise
  pub base_url: String,
  /// Page size requested for listings unless the caller sets `per_page`
  pub per_page: Option<u32>,
  /// Whole-request timeout; no timeout when unset
  pub timeout_secs: Option<u64>,
  pub retry: RetryPolicy,
  /// Repository used by the CLI when `--repo` is not given
  pub default_repo: Option<String>,
}

impl Default for ClientConfig {
  fn default() -> Self {
    Self {
      base_url: API_BASE_URL.to_string(),
      per_page: None,
      timeout_secs: None,
      retry: RetryPolicy::default(),
      default_repo: None,
    }
  }
}

impl ClientConfig {
  /// Load configuration from `path`, or defaults if it does not exist
  pub fn load_from(path: &Path) -> Result<Self> {
    if !path.exists() {
      return Ok(Self::default());
    }

    let content = fs::read_to_string(path).with_context(|| format!("Failed to read config from {}", path.display()))?;
    let config: ClientConfig =
      toml::from_str(&content).with_context(|| format!("Failed to parse config from {}", path.display()))?;
    config.default_repo()?;
    Ok(config)
  }

  /// Save configuration to `path`, creating parent directories
  pub fn save_to(&self, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent).with_context(|| format!("Failed to create config directory {}", parent.display()))?;
    }
    let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
    fs::write(path, content).with_context(|| format!("Failed to write config to {}", path.display()))?;
    Ok(())
  }

  /// Apply `GHISSUE_API_URL` / `GHISSUE_REPO` overrides from `env`
  pub fn apply_env<F>(&mut self, env: F) -> Result<()>
  where
    F: Fn(&str) -> Option<String>,
  {
    if let Some(url) = env(ENV_API_URL).filter(|v| !v.is_empty()) {
      self.base_url = url;
    }
    if let Some(repo) = env(ENV_REPO).filter(|v| !v.is_empty()) {
      self.default_repo = Some(repo);
    }
    self.default_repo()?;
    Ok(())
  }

  pub fn timeout(&self) -> Option<Duration> {
    self.timeout_secs.map(Duration::from_secs)
  }

  /// The configured default repository, validated
  pub fn default_repo(&self) -> Result<Option<RepoId>> {
    self
      .default_repo
      .as_deref()
      .map(|repo| {
        repo
          .parse::<RepoId>()
          .with_context(|| format!("Invalid default_repo '{repo}'"))
      })
      .transpose()
  }
}
