//! GitHub Users API endpoint implementations.

use tracing::{debug, instrument};

use crate::client::GitHubClient;
use crate::error::ApiError;
use crate::models::User;
use crate::paths::ApiPath;
use crate::request::RequestDescriptor;

impl GitHubClient {
  /// Get the user the configured credential belongs to
  #[instrument(skip(self), level = "debug")]
  pub async fn get_current_user(&self) -> Result<User, ApiError> {
    self
      .execute(&RequestDescriptor::get(ApiPath::root().segment("user")))
      .await
  }

  /// Check that the credential is accepted by the API.
  ///
  /// Resolves to `Ok(false)` when GitHub rejects the credential; any other
  /// failure is passed through.
  #[instrument(skip(self), level = "debug")]
  pub async fn test_connection(&self) -> Result<bool, ApiError> {
    match self.get_current_user().await {
      Ok(user) => {
        debug!("Authenticated as {}", user.login);
        Ok(true)
      }
      Err(e) if e.is_auth_failure() => Ok(false),
      Err(e) => Err(e),
    }
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;
  use wiremock::matchers::{header, method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use crate::auth::Credential;
  use crate::client::GitHubClient;

  #[tokio::test]
  async fn test_get_current_user() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = GitHubClient::new(Credential::Token("test_token".to_string())).with_base_url(&mock_server.uri())?;

    Mock::given(method("GET"))
      .and(path("/user"))
      .and(header("Authorization", "token test_token"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!({
          "login": "test_user",
          "id": 1,
          "name": "Test User",
          "html_url": "https://github.com/test_user"
      })))
      .mount(&mock_server)
      .await;

    let user = client.get_current_user().await?;
    assert_eq!(user.login, "test_user");
    assert_eq!(user.name.as_deref(), Some("Test User"));
    assert!(client.test_connection().await?);

    Ok(())
  }

  #[tokio::test]
  async fn test_connection_with_bad_credentials() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = GitHubClient::new(Credential::Token("invalid".to_string())).with_base_url(&mock_server.uri())?;

    Mock::given(method("GET"))
      .and(path("/user"))
      .respond_with(ResponseTemplate::new(401).set_body_json(json!({
          "message": "Bad credentials",
          "documentation_url": "https://docs.github.com/rest"
      })))
      .mount(&mock_server)
      .await;

    let err = client.get_current_user().await.unwrap_err();
    assert!(err.is_auth_failure());
    assert!(err.to_string().contains("Bad credentials"));
    assert!(!client.test_connection().await?);

    Ok(())
  }

  #[tokio::test]
  async fn test_connection_passes_server_errors_through() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = GitHubClient::new(Credential::Anonymous).with_base_url(&mock_server.uri())?;

    Mock::given(method("GET"))
      .and(path("/user"))
      .respond_with(ResponseTemplate::new(503))
      .mount(&mock_server)
      .await;

    let err = client.test_connection().await.unwrap_err();
    assert_eq!(err.status().map(|s| s.as_u16()), Some(503));
    Ok(())
  }
}
