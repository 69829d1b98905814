//! Configuration directory management for testing

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary configuration directory, optionally seeded with a
/// `config.toml`
pub struct ConfigDirGuard {
  temp_dir: TempDir,
  config_dir: PathBuf,
}

impl ConfigDirGuard {
  /// Create an empty configuration directory
  pub fn new() -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_dir = temp_dir.path().join("ghissue");
    fs::create_dir_all(&config_dir).expect("Failed to create config directory");

    Self { temp_dir, config_dir }
  }

  /// Create a configuration directory whose `config.toml` holds `content`
  pub fn with_config(content: &str) -> Self {
    let guard = Self::new();
    fs::write(guard.config_path(), content).expect("Failed to write test config.toml");
    guard
  }

  /// Root of the temporary tree, suitable for `XDG_CONFIG_HOME`
  pub fn root(&self) -> &Path {
    self.temp_dir.path()
  }

  pub fn config_dir(&self) -> &Path {
    &self.config_dir
  }

  pub fn config_path(&self) -> PathBuf {
    self.config_dir.join("config.toml")
  }
}

impl Default for ConfigDirGuard {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_new_has_no_config_file() {
    let guard = ConfigDirGuard::new();
    assert!(guard.config_dir().is_dir());
    assert!(!guard.config_path().exists());
  }

  #[test]
  fn test_with_config_writes_file() {
    let guard = ConfigDirGuard::with_config("per_page = 10\n");
    assert!(guard.config_path().starts_with(guard.root()));
    assert_eq!(fs::read_to_string(guard.config_path()).unwrap(), "per_page = 10\n");
  }
}
