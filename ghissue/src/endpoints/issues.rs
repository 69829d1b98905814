//! GitHub Issues API endpoint implementations.

use serde::Serialize;
use tracing::{info, instrument};

use crate::client::GitHubClient;
use crate::error::ApiError;
use crate::models::Issue;
use crate::pagination::Pages;
use crate::paths::{ApiPath, RepoId};
use crate::request::RequestDescriptor;

/// Fields for creating or editing an issue.
///
/// Unset fields are left out of the request body, so an edit only touches
/// what the caller set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IssueData {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub title: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub body: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub state: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub labels: Option<Vec<String>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub assignees: Option<Vec<String>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub milestone: Option<u64>,
}

impl IssueData {
  pub fn titled(title: impl Into<String>) -> Self {
    Self {
      title: Some(title.into()),
      ..Self::default()
    }
  }
}

/// Query filters for listing issues
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IssueListOptions {
  /// `open`, `closed` or `all`
  pub state: Option<String>,
  pub labels: Vec<String>,
  pub assignee: Option<String>,
  pub creator: Option<String>,
  pub mentioned: Option<String>,
  /// Milestone number, `*` or `none`
  pub milestone: Option<String>,
  pub sort: Option<String>,
  pub direction: Option<String>,
  pub since: Option<String>,
  pub per_page: Option<u32>,
}

/// Issue-tracker operations for one repository
#[derive(Debug, Clone)]
pub struct Issues<'a> {
  pub(crate) client: &'a GitHubClient,
  pub(crate) repo: RepoId,
}

impl<'a> Issues<'a> {
  pub fn new(client: &'a GitHubClient, repo: RepoId) -> Self {
    Self { client, repo }
  }

  pub fn repo(&self) -> &RepoId {
    &self.repo
  }

  /// `/repos/{owner}/{repo}/issues`
  pub(crate) fn issues_path(&self) -> ApiPath {
    self.repo.path().segment("issues")
  }

  /// Create a new issue.
  ///
  /// # Errors
  ///
  /// Returns [`ApiError::Client`] when GitHub rejects the data (for example
  /// a missing title) and [`ApiError::Transport`] when the request cannot
  /// be sent.
  #[instrument(skip(self, data), fields(repo = %self.repo), level = "debug")]
  pub async fn create_issue(&self, data: &IssueData) -> Result<Issue, ApiError> {
    info!("Creating issue in {}", self.repo);
    let descriptor = RequestDescriptor::post(self.issues_path(), data)?;
    self.client.execute(&descriptor).await
  }

  /// List every issue matching `options`, following all pages.
  #[instrument(skip(self, options), fields(repo = %self.repo), level = "debug")]
  pub async fn list_issues(&self, options: &IssueListOptions) -> Result<Vec<Issue>, ApiError> {
    info!("Listing issues for {}", self.repo);
    self.issues_pages(options)?.collect_all().await
  }

  /// Page-by-page access to the issues matching `options`
  pub fn issues_pages(&self, options: &IssueListOptions) -> Result<Pages<'a, Issue>, ApiError> {
    let descriptor = RequestDescriptor::get(self.issues_path()).with_query(options)?;
    Ok(self.client.paginate(descriptor))
  }

  /// Get a specific issue by number.
  ///
  /// # Errors
  ///
  /// Returns [`ApiError::NotFound`] if the issue does not exist.
  #[instrument(skip(self), fields(repo = %self.repo), level = "debug")]
  pub async fn get_issue(&self, number: u64) -> Result<Issue, ApiError> {
    info!("Fetching issue #{} for {}", number, self.repo);
    let descriptor = RequestDescriptor::get(self.issues_path().id(number));
    self.client.execute(&descriptor).await
  }

  /// Apply a partial update to an issue.
  #[instrument(skip(self, data), fields(repo = %self.repo), level = "debug")]
  pub async fn edit_issue(&self, number: u64, data: &IssueData) -> Result<Issue, ApiError> {
    info!("Editing issue #{} for {}", number, self.repo);
    let descriptor = RequestDescriptor::patch(self.issues_path().id(number), data)?;
    self.client.execute(&descriptor).await
  }
}

#[cfg(test)]
mod tests {
  use ghissue_test_utils::fixtures::{issue_json, next_link};
  use serde_json::json;
  use wiremock::matchers::{body_json, method, path, query_param, query_param_is_missing};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use super::*;
  use crate::auth::Credential;

  async fn setup() -> anyhow::Result<(MockServer, GitHubClient)> {
    let mock_server = MockServer::start().await;
    let client = GitHubClient::new(Credential::Token("test_token".to_string())).with_base_url(&mock_server.uri())?;
    Ok((mock_server, client))
  }

  fn repo() -> RepoId {
    RepoId::new("owner", "repo").unwrap()
  }

  #[tokio::test]
  async fn test_get_issue_success() -> anyhow::Result<()> {
    let (mock_server, client) = setup().await?;

    Mock::given(method("GET"))
      .and(path("/repos/owner/repo/issues/123"))
      .respond_with(ResponseTemplate::new(200).set_body_json(issue_json(123, "Test Issue")))
      .mount(&mock_server)
      .await;

    let issue = client.issues(repo()).get_issue(123).await?;

    assert_eq!(issue.number, 123);
    assert_eq!(issue.title, "Test Issue");
    assert_eq!(issue.state, "open");

    Ok(())
  }

  #[tokio::test]
  async fn test_get_issue_not_found() -> anyhow::Result<()> {
    let (mock_server, client) = setup().await?;

    Mock::given(method("GET"))
      .and(path("/repos/owner/repo/issues/404"))
      .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
      .mount(&mock_server)
      .await;

    let err = client.issues(repo()).get_issue(404).await.unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("Not Found"));

    Ok(())
  }

  #[tokio::test]
  async fn test_edit_issue_sends_only_set_fields() -> anyhow::Result<()> {
    let (mock_server, client) = setup().await?;

    let mut edited = issue_json(7, "Original title");
    edited["state"] = json!("closed");
    Mock::given(method("PATCH"))
      .and(path("/repos/owner/repo/issues/7"))
      .and(body_json(json!({"state": "closed"})))
      .respond_with(ResponseTemplate::new(200).set_body_json(edited))
      .expect(1)
      .mount(&mock_server)
      .await;

    let data = IssueData {
      state: Some("closed".to_string()),
      ..IssueData::default()
    };
    let issue = client.issues(repo()).edit_issue(7, &data).await?;

    assert_eq!(issue.state, "closed");
    assert_eq!(issue.title, "Original title");
    Ok(())
  }

  #[tokio::test]
  async fn test_create_issue_validation_failure() -> anyhow::Result<()> {
    let (mock_server, client) = setup().await?;

    Mock::given(method("POST"))
      .and(path("/repos/owner/repo/issues"))
      .respond_with(ResponseTemplate::new(422).set_body_json(json!({
        "message": "Validation Failed",
        "errors": [{"resource": "Issue", "field": "title", "code": "missing_field"}]
      })))
      .mount(&mock_server)
      .await;

    let err = client.issues(repo()).create_issue(&IssueData::default()).await.unwrap_err();
    assert!(matches!(err, ApiError::Client { ref message, .. } if message == "Validation Failed"));
    Ok(())
  }

  #[tokio::test]
  async fn test_list_issues_with_page_size_one() -> anyhow::Result<()> {
    let (mock_server, client) = setup().await?;
    let base = mock_server.uri();

    // Three issues, one per page
    for (page, number) in [(1u32, 3u64), (2, 2), (3, 1)] {
      let mut response = ResponseTemplate::new(200).set_body_json(json!([issue_json(number, "Issue")]));
      if page < 3 {
        response = response.insert_header(
          "link",
          next_link(&format!("{base}/repos/owner/repo/issues?state=all&per_page=1&page={}", page + 1)),
        );
      }
      let mut mock = Mock::given(method("GET"))
        .and(path("/repos/owner/repo/issues"))
        .and(query_param("state", "all"))
        .and(query_param("per_page", "1"));
      mock = if page == 1 {
        mock.and(query_param_is_missing("page"))
      } else {
        mock.and(query_param("page", page.to_string()))
      };
      mock.respond_with(response).expect(1).mount(&mock_server).await;
    }

    let options = IssueListOptions {
      state: Some("all".to_string()),
      per_page: Some(1),
      ..IssueListOptions::default()
    };
    let issues = client.issues(repo()).list_issues(&options).await?;

    let numbers: Vec<u64> = issues.iter().map(|i| i.number).collect();
    assert_eq!(numbers, vec![3, 2, 1]);
    Ok(())
  }

  #[tokio::test]
  async fn test_list_issues_label_filter() -> anyhow::Result<()> {
    let (mock_server, client) = setup().await?;

    Mock::given(method("GET"))
      .and(path("/repos/owner/repo/issues"))
      .and(query_param("labels", "bug,ui"))
      .and(query_param("assignee", "octocat"))
      .respond_with(ResponseTemplate::new(200).set_body_json(json!([issue_json(5, "Broken button")])))
      .expect(1)
      .mount(&mock_server)
      .await;

    let options = IssueListOptions {
      labels: vec!["bug".to_string(), "ui".to_string()],
      assignee: Some("octocat".to_string()),
      ..IssueListOptions::default()
    };
    let issues = client.issues(repo()).list_issues(&options).await?;
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].title, "Broken button");
    Ok(())
  }
}
