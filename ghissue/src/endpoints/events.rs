//! GitHub Issue Events API endpoint implementations.

use tracing::{info, instrument};

use crate::endpoints::issues::Issues;
use crate::error::ApiError;
use crate::models::IssueEvent;
use crate::pagination::Pages;
use crate::request::RequestDescriptor;

impl<'a> Issues<'a> {
  /// List the events (labelled, closed, referenced, ...) recorded on an
  /// issue, following all pages.
  #[instrument(skip(self), fields(repo = %self.repo), level = "debug")]
  pub async fn list_issue_events(&self, number: u64) -> Result<Vec<IssueEvent>, ApiError> {
    info!("Listing events for #{} in {}", number, self.repo);
    self.issue_events_pages(number).collect_all().await
  }

  pub fn issue_events_pages(&self, number: u64) -> Pages<'a, IssueEvent> {
    let descriptor = RequestDescriptor::get(self.issues_path().id(number).segment("events"));
    self.client.paginate(descriptor)
  }
}
