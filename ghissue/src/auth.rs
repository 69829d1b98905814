//! Authentication for the GitHub client.
//!
//! A [`Credential`] is chosen once, when the client is built, and attached to
//! every outgoing request. [`discover_credential`] looks for a token in the
//! environment first, then for a `.netrc` entry, and falls back to anonymous
//! access.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use reqwest::RequestBuilder;
use reqwest::header::AUTHORIZATION;
use tracing::debug;

use crate::client::GitHubClient;
use crate::config::ClientConfig;
use crate::consts::{ENV_TOKEN_VARS, NETRC_MACHINES};

/// Authentication material for the GitHub API
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
  /// No `Authorization` header; only public data is reachable
  Anonymous,
  /// Personal access or OAuth token, sent as `Authorization: token <t>`
  Token(String),
  /// Username and password (or token) sent with HTTP basic auth
  Basic { username: String, password: String },
}

impl Credential {
  pub(crate) fn apply(&self, builder: RequestBuilder) -> RequestBuilder {
    match self {
      Credential::Anonymous => builder,
      Credential::Token(token) => builder.header(AUTHORIZATION, format!("token {token}")),
      Credential::Basic { username, password } => builder.basic_auth(username, Some(password)),
    }
  }

  pub fn is_anonymous(&self) -> bool {
    matches!(self, Credential::Anonymous)
  }
}

// Never print secrets
impl fmt::Debug for Credential {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Credential::Anonymous => f.write_str("Anonymous"),
      Credential::Token(_) => f.write_str("Token(***)"),
      Credential::Basic { username, .. } => f.debug_struct("Basic").field("username", username).finish_non_exhaustive(),
    }
  }
}

/// Find a credential using the process environment and `home/.netrc`.
pub fn discover_credential(home: &Path) -> Result<Credential> {
  discover_credential_with(|name| std::env::var(name).ok(), home)
}

/// Find a credential using `env` as the environment lookup.
pub fn discover_credential_with<F>(env: F, home: &Path) -> Result<Credential>
where
  F: Fn(&str) -> Option<String>,
{
  for var in ENV_TOKEN_VARS {
    if let Some(token) = env(var).filter(|t| !t.trim().is_empty()) {
      debug!("Using GitHub token from ${}", var);
      return Ok(Credential::Token(token.trim().to_string()));
    }
  }

  let netrc_path = home.join(".netrc");
  if netrc_path.exists() {
    for machine in NETRC_MACHINES {
      if let Some((username, password)) = parse_netrc_file(&netrc_path, machine)? {
        debug!("Using .netrc credentials for machine {}", machine);
        return Ok(Credential::Basic { username, password });
      }
    }
  }

  debug!("No GitHub credentials found, continuing anonymously");
  Ok(Credential::Anonymous)
}

/// Parses a `.netrc` file and returns `(login, password)` for the requested
/// machine.
///
/// Both single-line (`machine host login user password pass`) and multi-line
/// layouts are accepted. Missing or incomplete entries yield `Ok(None)`.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn parse_netrc_file(path: &Path, target_machine: &str) -> Result<Option<(String, String)>> {
  let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
  let reader = BufReader::new(file);

  let mut current_machine: Option<String> = None;
  let mut login: Option<String> = None;
  let mut password: Option<String> = None;

  for line in reader.lines() {
    let line = line.context("Failed to read line from .netrc")?;
    let mut tokens = line.split_whitespace();

    while let Some(token) = tokens.next() {
      match token {
        "machine" | "default" => {
          if current_machine.as_deref() == Some(target_machine)
            && let (Some(login), Some(password)) = (login.take(), password.take())
          {
            return Ok(Some((login, password)));
          }
          login = None;
          password = None;
          current_machine = if token == "default" {
            None
          } else {
            tokens.next().map(str::to_string)
          };
        }
        "login" => login = tokens.next().map(str::to_string),
        "password" => password = tokens.next().map(str::to_string),
        _ => {}
      }
    }
  }

  if current_machine.as_deref() == Some(target_machine)
    && let (Some(login), Some(password)) = (login, password)
  {
    return Ok(Some((login, password)));
  }

  Ok(None)
}

/// Create a client from the configuration and whatever credential
/// [`discover_credential`] finds.
pub fn create_github_client_from_env(home: &Path, config: &ClientConfig) -> Result<GitHubClient> {
  let credential = discover_credential(home).context("Failed to discover GitHub credentials")?;
  GitHubClient::with_config(credential, config).context("Failed to create GitHub client")
}
