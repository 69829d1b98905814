//! GitHub Labels API endpoint implementations.

use serde::Serialize;
use tracing::{info, instrument};

use crate::endpoints::issues::Issues;
use crate::error::ApiError;
use crate::models::Label;
use crate::pagination::Pages;
use crate::paths::ApiPath;
use crate::request::RequestDescriptor;

/// Fields for creating or editing a label
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LabelData {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  /// Renames the label when editing
  #[serde(skip_serializing_if = "Option::is_none")]
  pub new_name: Option<String>,
  /// Hex colour without the leading `#`
  #[serde(skip_serializing_if = "Option::is_none")]
  pub color: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
}

/// Query filters for listing labels
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LabelListOptions {
  pub per_page: Option<u32>,
}

impl<'a> Issues<'a> {
  fn labels_path(&self) -> ApiPath {
    self.repo.path().segment("labels")
  }

  /// `/repos/{owner}/{repo}/labels/{name}`, with the name percent-encoded.
  ///
  /// Names that would resolve to the collection itself (`""`, `.`, `..`)
  /// are rejected before anything is sent.
  fn label_path(&self, name: &str) -> Result<ApiPath, ApiError> {
    if matches!(name, "" | "." | "..") {
      return Err(ApiError::InvalidRequest(format!("Invalid label name '{name}'")));
    }
    Ok(self.labels_path().segment(name))
  }

  #[instrument(skip(self, options), fields(repo = %self.repo), level = "debug")]
  pub async fn list_labels(&self, options: &LabelListOptions) -> Result<Vec<Label>, ApiError> {
    info!("Listing labels for {}", self.repo);
    self.labels_pages(options)?.collect_all().await
  }

  pub fn labels_pages(&self, options: &LabelListOptions) -> Result<Pages<'a, Label>, ApiError> {
    let descriptor = RequestDescriptor::get(self.labels_path()).with_query(options)?;
    Ok(self.client.paginate(descriptor))
  }

  #[instrument(skip(self), fields(repo = %self.repo), level = "debug")]
  pub async fn get_label(&self, name: &str) -> Result<Label, ApiError> {
    info!("Fetching label '{}' for {}", name, self.repo);
    self.client.execute(&RequestDescriptor::get(self.label_path(name)?)).await
  }

  #[instrument(skip(self, data), fields(repo = %self.repo), level = "debug")]
  pub async fn create_label(&self, data: &LabelData) -> Result<Label, ApiError> {
    info!("Creating label in {}", self.repo);
    let descriptor = RequestDescriptor::post(self.labels_path(), data)?;
    self.client.execute(&descriptor).await
  }

  #[instrument(skip(self, data), fields(repo = %self.repo), level = "debug")]
  pub async fn edit_label(&self, name: &str, data: &LabelData) -> Result<Label, ApiError> {
    info!("Editing label '{}' for {}", name, self.repo);
    let descriptor = RequestDescriptor::patch(self.label_path(name)?, data)?;
    self.client.execute(&descriptor).await
  }

  /// Delete a label. Resolves to `true` on success.
  #[instrument(skip(self), fields(repo = %self.repo), level = "debug")]
  pub async fn delete_label(&self, name: &str) -> Result<bool, ApiError> {
    info!("Deleting label '{}' for {}", name, self.repo);
    self
      .client
      .execute_empty(&RequestDescriptor::delete(self.label_path(name)?))
      .await
  }
}

#[cfg(test)]
mod tests {
  use ghissue_test_utils::fixtures::label_json;
  use serde_json::json;
  use wiremock::matchers::{body_json, method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use super::*;
  use crate::auth::Credential;
  use crate::client::GitHubClient;
  use crate::paths::RepoId;

  async fn setup() -> anyhow::Result<(MockServer, GitHubClient)> {
    let mock_server = MockServer::start().await;
    let client = GitHubClient::new(Credential::Anonymous).with_base_url(&mock_server.uri())?;
    Ok((mock_server, client))
  }

  fn repo() -> RepoId {
    RepoId::new("owner", "repo").unwrap()
  }

  #[tokio::test]
  async fn test_get_label_encodes_name() -> anyhow::Result<()> {
    let (mock_server, client) = setup().await?;

    Mock::given(method("GET"))
      .and(path("/repos/owner/repo/labels/good%20first%20issue"))
      .respond_with(ResponseTemplate::new(200).set_body_json(label_json("good first issue", "7057ff")))
      .expect(1)
      .mount(&mock_server)
      .await;

    let label = client.issues(repo()).get_label("good first issue").await?;
    assert_eq!(label.name, "good first issue");
    assert_eq!(label.color.as_deref(), Some("7057ff"));
    Ok(())
  }

  #[tokio::test]
  async fn test_empty_label_name_is_rejected_locally() -> anyhow::Result<()> {
    let (mock_server, client) = setup().await?;

    let err = client.issues(repo()).delete_label("").await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidRequest(_)));
    assert!(mock_server.received_requests().await.unwrap().is_empty());
    Ok(())
  }

  #[tokio::test]
  async fn test_dot_label_names_never_reach_the_collection() -> anyhow::Result<()> {
    let (mock_server, client) = setup().await?;
    let issues = client.issues(repo());

    let err = issues.delete_label("..").await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidRequest(_)));

    let err = issues.get_label(".").await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidRequest(_)));

    let err = issues.edit_label("..", &LabelData::default()).await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidRequest(_)));

    assert!(mock_server.received_requests().await.unwrap().is_empty());
    Ok(())
  }

  #[tokio::test]
  async fn test_list_create_edit_delete_label() -> anyhow::Result<()> {
    let (mock_server, client) = setup().await?;

    Mock::given(method("GET"))
      .and(path("/repos/owner/repo/labels"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!([label_json("bug", "d73a4a")])))
      .expect(1)
      .mount(&mock_server)
      .await;
    Mock::given(method("POST"))
      .and(path("/repos/owner/repo/labels"))
      .and(body_json(json!({"name": "triage", "color": "ededed"})))
      .respond_with(ResponseTemplate::new(201).set_body_json(label_json("triage", "ededed")))
      .expect(1)
      .mount(&mock_server)
      .await;
    Mock::given(method("PATCH"))
      .and(path("/repos/owner/repo/labels/triage"))
      .and(body_json(json!({"new_name": "needs-triage"})))
      .respond_with(ResponseTemplate::new(200).set_body_json(label_json("needs-triage", "ededed")))
      .expect(1)
      .mount(&mock_server)
      .await;
    Mock::given(method("DELETE"))
      .and(path("/repos/owner/repo/labels/needs-triage"))
      .respond_with(ResponseTemplate::new(204))
      .expect(1)
      .mount(&mock_server)
      .await;

    let issues = client.issues(repo());

    let labels = issues.list_labels(&LabelListOptions::default()).await?;
    assert_eq!(labels[0].name, "bug");

    let created = issues
      .create_label(&LabelData {
        name: Some("triage".to_string()),
        color: Some("ededed".to_string()),
        ..LabelData::default()
      })
      .await?;
    assert_eq!(created.name, "triage");

    let renamed = issues
      .edit_label(
        "triage",
        &LabelData {
          new_name: Some("needs-triage".to_string()),
          ..LabelData::default()
        },
      )
      .await?;
    assert_eq!(renamed.name, "needs-triage");

    assert!(issues.delete_label("needs-triage").await?);
    Ok(())
  }
}
