//! # API Errors
//!
//! Typed failures returned by every client operation. HTTP statuses are
//! classified once, in [`ApiError::from_status`], so endpoint code never has
//! to match on status codes itself.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors produced while building, sending, or decoding a GitHub API request
#[derive(Debug, Error)]
pub enum ApiError {
  /// The request never produced an HTTP response (DNS, connect, TLS, timeout)
  #[error("Request to {url} failed: {source}")]
  Transport {
    url: String,
    #[source]
    source: reqwest::Error,
  },

  /// HTTP 404 from the remote service
  #[error("Not found: {message}")]
  NotFound { message: String },

  /// Any other 4xx response, including authentication failures
  #[error("HTTP {status}: {message}")]
  Client { status: StatusCode, message: String },

  /// A 5xx response
  #[error("Server error HTTP {status}: {message}")]
  Server { status: StatusCode, message: String },

  /// A successful response whose body did not match the expected shape
  #[error("Failed to decode response from {url}: {source}")]
  Decode {
    url: String,
    #[source]
    source: serde_json::Error,
  },

  /// The request could not be assembled (bad base URL, unserializable body)
  #[error("Invalid request: {0}")]
  InvalidRequest(String),
}

impl ApiError {
  /// Classify a non-success response by status, keeping the remote message.
  pub fn from_status(status: StatusCode, body: &str) -> Self {
    let message = extract_message(status, body);
    if status == StatusCode::NOT_FOUND {
      ApiError::NotFound { message }
    } else if status.is_server_error() {
      ApiError::Server { status, message }
    } else {
      ApiError::Client { status, message }
    }
  }

  /// HTTP status carried by the error, if the remote answered at all
  pub fn status(&self) -> Option<StatusCode> {
    match self {
      ApiError::NotFound { .. } => Some(StatusCode::NOT_FOUND),
      ApiError::Client { status, .. } | ApiError::Server { status, .. } => Some(*status),
      ApiError::Transport { .. } | ApiError::Decode { .. } | ApiError::InvalidRequest(_) => None,
    }
  }

  /// Whether a [`crate::RetryPolicy`] may resend the request
  pub fn is_retryable(&self) -> bool {
    matches!(self, ApiError::Transport { .. } | ApiError::Server { .. })
  }

  pub fn is_not_found(&self) -> bool {
    matches!(self, ApiError::NotFound { .. })
  }

  /// Whether the remote rejected the credential
  pub fn is_auth_failure(&self) -> bool {
    matches!(
      self.status(),
      Some(StatusCode::UNAUTHORIZED) | Some(StatusCode::FORBIDDEN)
    )
  }
}

/// Prefer GitHub's JSON `message` field, then the raw body, then the reason
/// phrase.
fn extract_message(status: StatusCode, body: &str) -> String {
  if let Ok(error_json) = serde_json::from_str::<serde_json::Value>(body)
    && let Some(message) = error_json.get("message").and_then(|m| m.as_str())
  {
    return message.to_string();
  }

  let trimmed = body.trim();
  if !trimmed.is_empty() {
    return trimmed.to_string();
  }

  status.canonical_reason().unwrap_or("Unknown error").to_string()
}
