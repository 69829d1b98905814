//! GitHub Issue Comments API endpoint implementations.

use serde::Serialize;
use tracing::{info, instrument};

use crate::endpoints::issues::Issues;
use crate::error::ApiError;
use crate::models::IssueComment;
use crate::pagination::Pages;
use crate::paths::ApiPath;
use crate::request::RequestDescriptor;

/// Request body for creating or editing a comment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentBody<'b> {
  pub body: &'b str,
}

impl<'a> Issues<'a> {
  /// `/repos/{owner}/{repo}/issues/comments/{id}`
  fn comment_path(&self, comment_id: u64) -> ApiPath {
    self.issues_path().segment("comments").id(comment_id)
  }

  /// List all comments on an issue, following all pages.
  #[instrument(skip(self), fields(repo = %self.repo), level = "debug")]
  pub async fn list_issue_comments(&self, number: u64) -> Result<Vec<IssueComment>, ApiError> {
    info!("Listing comments on #{} in {}", number, self.repo);
    self.issue_comments_pages(number).collect_all().await
  }

  /// Page-by-page access to the comments on an issue
  pub fn issue_comments_pages(&self, number: u64) -> Pages<'a, IssueComment> {
    let descriptor = RequestDescriptor::get(self.issues_path().id(number).segment("comments"));
    self.client.paginate(descriptor)
  }

  /// Get a single comment by its id.
  #[instrument(skip(self), fields(repo = %self.repo), level = "debug")]
  pub async fn get_issue_comment(&self, comment_id: u64) -> Result<IssueComment, ApiError> {
    info!("Fetching comment {} in {}", comment_id, self.repo);
    self.client.execute(&RequestDescriptor::get(self.comment_path(comment_id))).await
  }

  /// Comment on an issue.
  ///
  /// An empty body is sent as-is; GitHub rejects it with a client error.
  #[instrument(skip(self, body), fields(repo = %self.repo), level = "debug")]
  pub async fn create_issue_comment(&self, number: u64, body: &str) -> Result<IssueComment, ApiError> {
    info!("Commenting on #{} in {}", number, self.repo);
    let path = self.issues_path().id(number).segment("comments");
    let descriptor = RequestDescriptor::post(path, &CommentBody { body })?;
    self.client.execute(&descriptor).await
  }

  /// Replace the body of an existing comment.
  #[instrument(skip(self, body), fields(repo = %self.repo), level = "debug")]
  pub async fn edit_issue_comment(&self, comment_id: u64, body: &str) -> Result<IssueComment, ApiError> {
    info!("Editing comment {} in {}", comment_id, self.repo);
    let descriptor = RequestDescriptor::patch(self.comment_path(comment_id), &CommentBody { body })?;
    self.client.execute(&descriptor).await
  }

  /// Delete a comment. Resolves to `true` on success.
  ///
  /// # Errors
  ///
  /// Deleting a comment that no longer exists yields [`ApiError::NotFound`].
  #[instrument(skip(self), fields(repo = %self.repo), level = "debug")]
  pub async fn delete_issue_comment(&self, comment_id: u64) -> Result<bool, ApiError> {
    info!("Deleting comment {} in {}", comment_id, self.repo);
    self
      .client
      .execute_empty(&RequestDescriptor::delete(self.comment_path(comment_id)))
      .await
  }
}
