//! # Client Creation
//!
//! Builds the tokio runtime and the authenticated GitHub client shared by
//! every command, and resolves which repository a command targets.

use anyhow::{Context, Result, bail};
use directories::BaseDirs;
use ghissue::{ClientConfig, ConfigDirs, GitHubClient, RepoId, create_github_client_from_env};
use tokio::runtime::Runtime;
use tracing::debug;

/// Load `config.toml` plus environment overrides
pub fn load_config() -> Result<ClientConfig> {
  let dirs = ConfigDirs::new()?;
  debug!("Loading configuration from {}", dirs.config_path().display());
  dirs.load_config()
}

/// Creates a tokio runtime and a GitHub client using discovered credentials
pub fn create_runtime_and_client(config: &ClientConfig) -> Result<(Runtime, GitHubClient)> {
  let rt = Runtime::new().context("Failed to create async runtime")?;
  let base_dirs = BaseDirs::new().context("Failed to determine home directory")?;
  let client = create_github_client_from_env(base_dirs.home_dir(), config)?;
  debug!("Using API base URL {}", client.base_url());
  Ok((rt, client))
}

/// Pick the target repository: `--repo` first, then `GHISSUE_REPO` or
/// `default_repo` from the configuration file.
///
/// `--repo` accepts `owner/repo` or any GitHub repository URL.
pub fn resolve_repo(flag: Option<&str>, config: &ClientConfig) -> Result<RepoId> {
  if let Some(raw) = flag {
    let repo = if raw.contains("github.com") {
      RepoId::from_url(raw)
    } else {
      raw.parse::<RepoId>()
    };
    return repo.with_context(|| format!("Invalid --repo value '{raw}'"));
  }
  match config.default_repo()? {
    Some(repo) => Ok(repo),
    None => bail!("No repository given. Pass --repo owner/repo or set GHISSUE_REPO."),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_resolve_repo_prefers_flag() {
    let config = ClientConfig {
      default_repo: Some("acme/gadgets".to_string()),
      ..ClientConfig::default()
    };

    let repo = resolve_repo(Some("acme/widgets"), &config).unwrap();
    assert_eq!(repo.to_string(), "acme/widgets");

    let repo = resolve_repo(None, &config).unwrap();
    assert_eq!(repo.to_string(), "acme/gadgets");
  }

  #[test]
  fn test_resolve_repo_accepts_url() {
    let repo = resolve_repo(Some("https://github.com/acme/widgets.git"), &ClientConfig::default()).unwrap();
    assert_eq!(repo.owner(), "acme");
    assert_eq!(repo.repo(), "widgets");
  }

  #[test]
  fn test_resolve_repo_without_any_source() {
    let err = resolve_repo(None, &ClientConfig::default()).unwrap_err();
    assert!(err.to_string().contains("--repo"));

    assert!(resolve_repo(Some("not a repo"), &ClientConfig::default()).is_err());
  }
}
