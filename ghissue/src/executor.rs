//! Sending request descriptors: headers, credential, retry, status
//! classification and decoding.

use reqwest::header::{self, HeaderMap};
use reqwest::{Method, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, instrument, trace, warn};
use url::Url;

use crate::client::GitHubClient;
use crate::consts::{ACCEPT, USER_AGENT};
use crate::error::ApiError;
use crate::pagination::Pages;
use crate::request::RequestDescriptor;

impl GitHubClient {
  /// Send `descriptor` and decode the JSON response.
  #[instrument(skip(self, descriptor), fields(method = %descriptor.method, path = %descriptor.path), level = "debug")]
  pub async fn execute<T: DeserializeOwned>(&self, descriptor: &RequestDescriptor) -> Result<T, ApiError> {
    let url = self.url_for(descriptor)?;
    let response = self.send(&descriptor.method, &url, descriptor.body.as_ref()).await?;
    decode(&url, response).await
  }

  /// Send `descriptor` and report success without reading a body.
  ///
  /// Used for DELETE, where GitHub answers `204 No Content`.
  #[instrument(skip(self, descriptor), fields(method = %descriptor.method, path = %descriptor.path), level = "debug")]
  pub async fn execute_empty(&self, descriptor: &RequestDescriptor) -> Result<bool, ApiError> {
    let url = self.url_for(descriptor)?;
    self.send(&descriptor.method, &url, descriptor.body.as_ref()).await?;
    Ok(true)
  }

  /// Lazily walk every page of a listing, starting at `descriptor`.
  pub fn paginate<T: DeserializeOwned>(&self, mut descriptor: RequestDescriptor) -> Pages<'_, T> {
    if let Some(per_page) = self.per_page
      && !descriptor.has_query("per_page")
    {
      descriptor.query.push(("per_page".to_string(), per_page.to_string()));
    }
    Pages::new(self, descriptor)
  }

  /// Resolve a descriptor's path and query against the base URL
  pub(crate) fn url_for(&self, descriptor: &RequestDescriptor) -> Result<Url, ApiError> {
    let mut url = descriptor.path.to_url(&self.base_url)?;
    if !descriptor.query.is_empty() {
      url.query_pairs_mut().extend_pairs(descriptor.query.iter());
    }
    Ok(url)
  }

  /// Send one request, retrying per the configured policy.
  pub(crate) async fn send(&self, method: &Method, url: &Url, body: Option<&Value>) -> Result<Response, ApiError> {
    let mut attempt = 0;
    loop {
      match self.send_once(method, url, body).await {
        Err(err) if err.is_retryable() && attempt < self.retry.max_retries => {
          attempt += 1;
          let delay = self.retry.delay_for(attempt);
          warn!(
            "{} {} failed ({}), retry {}/{} in {:?}",
            method, url, err, attempt, self.retry.max_retries, delay
          );
          tokio::time::sleep(delay).await;
        }
        outcome => return outcome,
      }
    }
  }

  async fn send_once(&self, method: &Method, url: &Url, body: Option<&Value>) -> Result<Response, ApiError> {
    trace!("GitHub API URL: {}", url);

    let mut request = self
      .client
      .request(method.clone(), url.clone())
      .header(header::ACCEPT, ACCEPT)
      .header(header::USER_AGENT, USER_AGENT);
    request = self.credential.apply(request);
    if let Some(body) = body {
      request = request.json(body);
    }

    let response = request.send().await.map_err(|source| ApiError::Transport {
      url: url.to_string(),
      source,
    })?;

    let status = response.status();
    debug!("GitHub API response status: {}", status);

    if status.is_success() {
      info!("{} {} -> {}", method, url.path(), status);
      return Ok(response);
    }

    let error_text = response.text().await.unwrap_or_default();
    let err = ApiError::from_status(status, &error_text);
    if err.is_auth_failure() {
      warn!("Authentication failed when accessing GitHub API");
    } else {
      warn!("GitHub API error: HTTP {} - {}", status, error_text);
    }
    Err(err)
  }
}

/// Read and decode a successful response body
pub(crate) async fn decode<T: DeserializeOwned>(url: &Url, response: Response) -> Result<T, ApiError> {
  let body = response.text().await.map_err(|source| ApiError::Transport {
    url: url.to_string(),
    source,
  })?;
  serde_json::from_str::<T>(&body).map_err(|source| ApiError::Decode {
    url: url.to_string(),
    source,
  })
}

/// Parse the `Link` header to find the `rel="next"` URL.
pub(crate) fn parse_next_link(headers: &HeaderMap) -> Option<String> {
  let link = headers.get(header::LINK)?.to_str().ok()?;
  link.split(',').find_map(|part| {
    let (target, params) = part.trim().split_once(';')?;
    let is_next = params
      .split(';')
      .any(|param| matches!(param.trim(), "rel=\"next\"" | "rel=next"));
    if !is_next {
      return None;
    }
    let target = target.trim();
    target
      .strip_prefix('<')
      .and_then(|t| t.strip_suffix('>'))
      .map(str::to_string)
  })
}
