//! Response models for the GitHub Issues API.
//!
//! Only the fields ghissue reads are modelled; unknown fields are ignored,
//! and anything GitHub may omit is optional or defaulted.

use serde::{Deserialize, Serialize};

/// Represents a GitHub user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  pub login: String,
  pub id: u64,
  #[serde(default)]
  pub name: Option<String>,
  #[serde(default)]
  pub html_url: Option<String>,
}

/// Represents a repository label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
  #[serde(default)]
  pub id: Option<u64>,
  pub name: String,
  #[serde(default)]
  pub color: Option<String>,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub default: bool,
}

/// Represents a repository milestone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
  pub number: u64,
  pub title: String,
  #[serde(default)]
  pub state: String,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub open_issues: u64,
  #[serde(default)]
  pub closed_issues: u64,
  #[serde(default)]
  pub due_on: Option<String>,
  #[serde(default)]
  pub html_url: Option<String>,
}

/// Represents a GitHub issue (pull requests are issues too)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
  pub number: u64,
  #[serde(default)]
  pub title: String,
  #[serde(default)]
  pub body: Option<String>,
  #[serde(default)]
  pub state: String,
  #[serde(default)]
  pub html_url: Option<String>,
  #[serde(default)]
  pub user: Option<User>,
  #[serde(default)]
  pub labels: Vec<Label>,
  #[serde(default)]
  pub assignees: Vec<User>,
  #[serde(default)]
  pub milestone: Option<Milestone>,
  #[serde(default)]
  pub comments: u64,
  #[serde(default)]
  pub created_at: Option<String>,
  #[serde(default)]
  pub updated_at: Option<String>,
  #[serde(default)]
  pub closed_at: Option<String>,
}

/// Represents a comment on an issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueComment {
  pub id: u64,
  #[serde(default)]
  pub body: String,
  #[serde(default)]
  pub user: Option<User>,
  #[serde(default)]
  pub html_url: Option<String>,
  #[serde(default)]
  pub created_at: Option<String>,
  #[serde(default)]
  pub updated_at: Option<String>,
}

/// Label reference carried by `labeled`/`unlabeled` events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLabel {
  pub name: String,
  #[serde(default)]
  pub color: Option<String>,
}

/// Represents an entry in an issue's timeline of events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueEvent {
  pub id: u64,
  pub event: String,
  #[serde(default)]
  pub actor: Option<User>,
  #[serde(default)]
  pub commit_id: Option<String>,
  #[serde(default)]
  pub label: Option<EventLabel>,
  #[serde(default)]
  pub created_at: Option<String>,
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn test_github_user_deserialization() {
    let json = json!({
        "login": "octocat",
        "id": 1,
        "name": "The Octocat"
    });

    let user: User = serde_json::from_value(json).unwrap();

    assert_eq!(user.login, "octocat");
    assert_eq!(user.id, 1);
    assert_eq!(user.name, Some("The Octocat".to_string()));
    assert_eq!(user.html_url, None);
  }

  #[test]
  fn test_issue_deserialization() {
    let json = json!({
        "number": 1347,
        "title": "Found a bug",
        "body": "I'm having a problem with this.",
        "html_url": "https://github.com/octocat/Hello-World/issues/1347",
        "state": "open",
        "user": {"login": "octocat", "id": 1},
        "labels": [{"id": 208045946, "name": "bug", "color": "f29513", "default": true}],
        "assignees": [{"login": "hubot", "id": 2}],
        "milestone": {"number": 1, "title": "v1.0", "state": "open", "open_issues": 4, "closed_issues": 8},
        "comments": 3,
        "created_at": "2011-04-22T13:33:48Z",
        "updated_at": "2011-04-22T13:33:48Z",
        "closed_at": null,
        "locked": false
    });

    let issue: Issue = serde_json::from_value(json).unwrap();

    assert_eq!(issue.number, 1347);
    assert_eq!(issue.state, "open");
    assert_eq!(issue.labels[0].name, "bug");
    assert!(issue.labels[0].default);
    assert_eq!(issue.assignees[0].login, "hubot");
    assert_eq!(issue.milestone.as_ref().map(|m| m.open_issues), Some(4));
    assert_eq!(issue.comments, 3);
    assert_eq!(issue.closed_at, None);
  }

  #[test]
  fn test_minimal_issue_deserialization() {
    let issue: Issue = serde_json::from_value(json!({"number": 42, "title": "bug"})).unwrap();

    assert_eq!(issue.number, 42);
    assert_eq!(issue.title, "bug");
    assert!(issue.labels.is_empty());
    assert_eq!(issue.user, None);
  }

  #[test]
  fn test_issue_event_deserialization() {
    let json = json!({
        "id": 6430295168i64,
        "event": "labeled",
        "actor": {"login": "octocat", "id": 1},
        "commit_id": null,
        "label": {"name": "bug", "color": "d73a4a"},
        "created_at": "2022-03-30T17:15:29Z"
    });

    let event: IssueEvent = serde_json::from_value(json).unwrap();

    assert_eq!(event.event, "labeled");
    assert_eq!(event.label.map(|l| l.name), Some("bug".to_string()));
    assert_eq!(event.commit_id, None);
  }
}
