//! JSON payloads shaped like GitHub REST API responses

use serde_json::{Value, json};

pub fn user_json(login: &str, id: u64) -> Value {
  json!({
    "login": login,
    "id": id,
    "html_url": format!("https://github.com/{login}"),
  })
}

pub fn issue_json(number: u64, title: &str) -> Value {
  json!({
    "number": number,
    "title": title,
    "body": null,
    "state": "open",
    "html_url": format!("https://github.com/owner/repo/issues/{number}"),
    "user": user_json("octocat", 1),
    "labels": [],
    "assignees": [],
    "comments": 0,
    "created_at": "2024-01-01T00:00:00Z",
    "updated_at": "2024-01-01T00:00:00Z",
    "closed_at": null,
  })
}

pub fn comment_json(id: u64, body: &str) -> Value {
  json!({
    "id": id,
    "body": body,
    "user": user_json("octocat", 1),
    "html_url": format!("https://github.com/owner/repo/issues/1#issuecomment-{id}"),
    "created_at": "2024-01-01T00:00:00Z",
    "updated_at": "2024-01-01T00:00:00Z",
  })
}

pub fn label_json(name: &str, color: &str) -> Value {
  json!({
    "id": 1000,
    "name": name,
    "color": color,
    "description": null,
    "default": false,
  })
}

pub fn milestone_json(number: u64, title: &str) -> Value {
  json!({
    "number": number,
    "title": title,
    "state": "open",
    "description": null,
    "open_issues": 0,
    "closed_issues": 0,
    "due_on": null,
    "html_url": format!("https://github.com/owner/repo/milestone/{number}"),
  })
}

pub fn event_json(id: u64, event: &str) -> Value {
  json!({
    "id": id,
    "event": event,
    "actor": user_json("octocat", 1),
    "commit_id": null,
    "created_at": "2024-01-01T00:00:00Z",
  })
}

/// A `Link` header value pointing at the next page
pub fn next_link(url: &str) -> String {
  format!("<{url}>; rel=\"next\"")
}
