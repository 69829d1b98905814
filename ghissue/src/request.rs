//! # Request Descriptors
//!
//! A [`RequestDescriptor`] is the `(method, path, body)` triple for one API
//! call, plus any query filters. Endpoint handlers only ever produce
//! descriptors; sending them is the client's job.

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::paths::ApiPath;

/// One HTTP call, before it is resolved against a base URL
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
  pub method: Method,
  pub path: ApiPath,
  pub query: Vec<(String, String)>,
  pub body: Option<Value>,
}

impl RequestDescriptor {
  pub fn new(method: Method, path: ApiPath) -> Self {
    Self {
      method,
      path,
      query: Vec::new(),
      body: None,
    }
  }

  pub fn get(path: ApiPath) -> Self {
    Self::new(Method::GET, path)
  }

  pub fn delete(path: ApiPath) -> Self {
    Self::new(Method::DELETE, path)
  }

  pub fn post<B: Serialize + ?Sized>(path: ApiPath, body: &B) -> Result<Self, ApiError> {
    Self::new(Method::POST, path).with_body(body)
  }

  pub fn patch<B: Serialize + ?Sized>(path: ApiPath, body: &B) -> Result<Self, ApiError> {
    Self::new(Method::PATCH, path).with_body(body)
  }

  /// Attach a JSON body.
  pub fn with_body<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
    let value = serde_json::to_value(body)
      .map_err(|e| ApiError::InvalidRequest(format!("Failed to serialize request body: {e}")))?;
    self.body = Some(value);
    Ok(self)
  }

  /// Flatten a filter struct into query pairs.
  ///
  /// `None` fields are skipped, sequences are joined with commas the way
  /// GitHub expects for `labels`.
  pub fn with_query<Q: Serialize + ?Sized>(mut self, filters: &Q) -> Result<Self, ApiError> {
    let value = serde_json::to_value(filters)
      .map_err(|e| ApiError::InvalidRequest(format!("Failed to serialize query filters: {e}")))?;
    match value {
      Value::Null => {}
      Value::Object(map) => {
        for (key, value) in map {
          if let Some(rendered) = render_query_value(&value) {
            self.query.push((key, rendered));
          }
        }
      }
      other => {
        return Err(ApiError::InvalidRequest(format!(
          "Query filters must serialize to an object, got {other}"
        )));
      }
    }
    Ok(self)
  }

  pub fn has_query(&self, key: &str) -> bool {
    self.query.iter().any(|(k, _)| k == key)
  }
}

fn render_query_value(value: &Value) -> Option<String> {
  match value {
    Value::Null => None,
    Value::String(s) => Some(s.clone()),
    Value::Array(items) => {
      let parts: Vec<String> = items.iter().filter_map(render_query_value).collect();
      if parts.is_empty() { None } else { Some(parts.join(",")) }
    }
    other => Some(other.to_string()),
  }
}
