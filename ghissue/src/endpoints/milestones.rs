//! GitHub Milestones API endpoint implementations.

use serde::Serialize;
use tracing::{info, instrument};

use crate::endpoints::issues::Issues;
use crate::error::ApiError;
use crate::models::Milestone;
use crate::pagination::Pages;
use crate::paths::ApiPath;
use crate::request::RequestDescriptor;

/// Fields for creating or editing a milestone
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MilestoneData {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub title: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub state: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  /// ISO 8601 timestamp, e.g. `2024-10-09T23:39:01Z`
  #[serde(skip_serializing_if = "Option::is_none")]
  pub due_on: Option<String>,
}

/// Query filters for listing milestones
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MilestoneListOptions {
  pub state: Option<String>,
  pub sort: Option<String>,
  pub direction: Option<String>,
  pub per_page: Option<u32>,
}

impl<'a> Issues<'a> {
  fn milestones_path(&self) -> ApiPath {
    self.repo.path().segment("milestones")
  }

  #[instrument(skip(self, options), fields(repo = %self.repo), level = "debug")]
  pub async fn list_milestones(&self, options: &MilestoneListOptions) -> Result<Vec<Milestone>, ApiError> {
    info!("Listing milestones for {}", self.repo);
    self.milestones_pages(options)?.collect_all().await
  }

  pub fn milestones_pages(&self, options: &MilestoneListOptions) -> Result<Pages<'a, Milestone>, ApiError> {
    let descriptor = RequestDescriptor::get(self.milestones_path()).with_query(options)?;
    Ok(self.client.paginate(descriptor))
  }

  #[instrument(skip(self), fields(repo = %self.repo), level = "debug")]
  pub async fn get_milestone(&self, number: u64) -> Result<Milestone, ApiError> {
    info!("Fetching milestone {} for {}", number, self.repo);
    self
      .client
      .execute(&RequestDescriptor::get(self.milestones_path().id(number)))
      .await
  }

  #[instrument(skip(self, data), fields(repo = %self.repo), level = "debug")]
  pub async fn create_milestone(&self, data: &MilestoneData) -> Result<Milestone, ApiError> {
    info!("Creating milestone in {}", self.repo);
    let descriptor = RequestDescriptor::post(self.milestones_path(), data)?;
    self.client.execute(&descriptor).await
  }

  #[instrument(skip(self, data), fields(repo = %self.repo), level = "debug")]
  pub async fn edit_milestone(&self, number: u64, data: &MilestoneData) -> Result<Milestone, ApiError> {
    info!("Editing milestone {} for {}", number, self.repo);
    let descriptor = RequestDescriptor::patch(self.milestones_path().id(number), data)?;
    self.client.execute(&descriptor).await
  }

  /// Delete a milestone. Resolves to `true` on success.
  #[instrument(skip(self), fields(repo = %self.repo), level = "debug")]
  pub async fn delete_milestone(&self, number: u64) -> Result<bool, ApiError> {
    info!("Deleting milestone {} for {}", number, self.repo);
    self
      .client
      .execute_empty(&RequestDescriptor::delete(self.milestones_path().id(number)))
      .await
  }
}

#[cfg(test)]
mod tests {
  use ghissue_test_utils::fixtures::milestone_json;
  use serde_json::json;
  use wiremock::matchers::{body_json, method, path, query_param};
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
  async fn test_list_milestones_by_state() -> anyhow::Result<()> {
    let (mock_server, client) = setup().await?;

    Mock::given(method("GET"))
      .and(path("/repos/owner/repo/milestones"))
      .and(query_param("state", "closed"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!([milestone_json(1, "v1.0")])))
      .expect(1)
      .mount(&mock_server)
      .await;

    let options = MilestoneListOptions {
      state: Some("closed".to_string()),
      ..MilestoneListOptions::default()
    };
    let milestones = client.issues(repo()).list_milestones(&options).await?;
    assert_eq!(milestones.len(), 1);
    assert_eq!(milestones[0].title, "v1.0");
    Ok(())
  }

  #[tokio::test]
  async fn test_create_and_get_milestone() -> anyhow::Result<()> {
    let (mock_server, client) = setup().await?;

    Mock::given(method("POST"))
      .and(path("/repos/owner/repo/milestones"))
      .and(body_json(json!({"title": "v2.0", "due_on": "2026-12-01T00:00:00Z"})))
      .respond_with(ResponseTemplate::new(201).set_body_json(milestone_json(2, "v2.0")))
      .expect(1)
      .mount(&mock_server)
      .await;
    Mock::given(method("GET"))
      .and(path("/repos/owner/repo/milestones/2"))
      .respond_with(ResponseTemplate::new(200).set_body_json(milestone_json(2, "v2.0")))
      .expect(1)
      .mount(&mock_server)
      .await;

    let issues = client.issues(repo());
    let data = MilestoneData {
      title: Some("v2.0".to_string()),
      due_on: Some("2026-12-01T00:00:00Z".to_string()),
      ..MilestoneData::default()
    };
    let created = issues.create_milestone(&data).await?;
    let fetched = issues.get_milestone(created.number).await?;
    assert_eq!(created, fetched);
    Ok(())
  }

  #[tokio::test]
  async fn test_edit_milestone() -> anyhow::Result<()> {
    let (mock_server, client) = setup().await?;

    let mut closed = milestone_json(2, "v2.0");
    closed["state"] = json!("closed");
    Mock::given(method("PATCH"))
      .and(path("/repos/owner/repo/milestones/2"))
      .and(body_json(json!({"state": "closed"})))
      .respond_with(ResponseTemplate::new(200).set_body_json(closed))
      .expect(1)
      .mount(&mock_server)
      .await;

    let data = MilestoneData {
      state: Some("closed".to_string()),
      ..MilestoneData::default()
    };
    let milestone = client.issues(repo()).edit_milestone(2, &data).await?;
    assert_eq!(milestone.state, "closed");
    Ok(())
  }

  #[tokio::test]
  async fn test_delete_milestone() -> anyhow::Result<()> {
    let (mock_server, client) = setup().await?;

    Mock::given(method("DELETE"))
      .and(path("/repos/owner/repo/milestones/2"))
      .respond_with(ResponseTemplate::new(204))
      .expect(1)
      .mount(&mock_server)
      .await;

    assert!(client.issues(repo()).delete_milestone(2).await?);
    Ok(())
  }
}
