//! # GitHub HTTP Client
//!
//! The shared executor behind every endpoint handler. It owns the HTTP
//! connection pool, the base URL, the credential, and the request policy;
//! none of these change after construction.

use anyhow::{Context, Result};
use reqwest::Client;
use url::Url;

use crate::auth::Credential;
use crate::config::{ClientConfig, RetryPolicy};
use crate::consts::API_BASE_URL;
use crate::endpoints::issues::Issues;
use crate::paths::RepoId;

/// Represents a GitHub API client
#[derive(Debug, Clone)]
pub struct GitHubClient {
  pub(crate) client: Client,
  pub(crate) base_url: Url,
  pub(crate) credential: Credential,
  pub(crate) retry: RetryPolicy,
  pub(crate) per_page: Option<u32>,
}

impl GitHubClient {
  /// Create a client for `api.github.com` with default settings
  pub fn new(credential: Credential) -> Self {
    Self {
      client: Client::new(),
      base_url: Url::parse(API_BASE_URL).expect("API_BASE_URL is a valid URL"),
      credential,
      retry: RetryPolicy::none(),
      per_page: None,
    }
  }

  /// Create a client from loaded configuration
  pub fn with_config(credential: Credential, config: &ClientConfig) -> Result<Self> {
    let mut builder = Client::builder();
    if let Some(timeout) = config.timeout() {
      builder = builder.timeout(timeout);
    }
    let client = builder.build().context("Failed to build HTTP client")?;

    Ok(Self {
      client,
      base_url: parse_base_url(&config.base_url)?,
      credential,
      retry: config.retry,
      per_page: config.per_page,
    })
  }

  /// Point the client at another API root (GitHub Enterprise, test servers)
  pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
    self.base_url = parse_base_url(base_url)?;
    Ok(self)
  }

  pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
    self.retry = retry;
    self
  }

  pub fn with_per_page(mut self, per_page: u32) -> Self {
    self.per_page = Some(per_page);
    self
  }

  pub fn base_url(&self) -> &Url {
    &self.base_url
  }

  pub fn credential(&self) -> &Credential {
    &self.credential
  }

  /// Issue-tracking operations scoped to `repo`
  pub fn issues(&self, repo: RepoId) -> Issues<'_> {
    Issues::new(self, repo)
  }
}

fn parse_base_url(raw: &str) -> Result<Url> {
  let url = Url::parse(raw).with_context(|| format!("Invalid API base URL '{raw}'"))?;
  if url.cannot_be_a_base() {
    anyhow::bail!("Invalid API base URL '{raw}': cannot be used as a base");
  }
  Ok(url)
}
