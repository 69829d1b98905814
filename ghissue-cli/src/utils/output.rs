//! # Output Formatting
//!
//! Coloured, emoji-prefixed messages and short human summaries of API
//! resources, plus the `--json` rendering path.

use anyhow::{Context, Result};
use ghissue::{Issue, IssueComment, IssueEvent, Label, Milestone};
use owo_colors::{OwoColorize, Stream, Style};
use serde::Serialize;

/// When coloured output is used
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
  /// Enable colored output
  Always,
  /// Detect from the terminal
  Auto,
  /// Disable colored output
  Never,
}

/// Style `value` for stdout, or leave it plain when colours are off
fn paint<T: std::fmt::Display>(value: T, style: Style) -> String {
  value.if_supports_color(Stream::Stdout, |t| t.style(style)).to_string()
}

/// Helper function to safely get an emoji or fallback to a default character
pub fn get_emoji_or_default(name: &str, default: &str) -> String {
  match emojis::get_by_shortcode(name) {
    Some(emoji) => emoji.to_string(),
    None => default.to_string(),
  }
}

pub fn print_success(message: &str) {
  let check = get_emoji_or_default("white_check_mark", "✓");
  println!("{} {}", paint(check, Style::new().green().bold()), message);
}

/// Errors go to stderr so `--json` output stays parseable
pub fn print_error(message: &str) {
  let cross = get_emoji_or_default("x", "✗");
  eprintln!(
    "{} {}",
    cross.if_supports_color(Stream::Stderr, |t| t.style(Style::new().red().bold())),
    message
  );
}

pub fn print_warning(message: &str) {
  let warning = get_emoji_or_default("warning", "⚠");
  println!("{} {}", paint(warning, Style::new().yellow().bold()), message);
}

pub fn print_info(message: &str) {
  let info = get_emoji_or_default("information_source", "ℹ");
  println!("{} {}", paint(info, Style::new().blue().bold()), message);
}

/// Pretty-print any API value as JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
  let rendered = serde_json::to_string_pretty(value).context("Failed to render JSON output")?;
  println!("{rendered}");
  Ok(())
}

pub fn format_state(state: &str) -> String {
  match state {
    "open" => paint(state, Style::new().green()),
    "closed" => paint(state, Style::new().red()),
    _ => state.to_string(),
  }
}

pub fn format_label_names(labels: &[Label]) -> String {
  labels
    .iter()
    .map(|label| paint(&label.name, Style::new().cyan()))
    .collect::<Vec<_>>()
    .join(", ")
}

/// One line per issue: number, state, title, labels
pub fn format_issue_line(issue: &Issue) -> String {
  let mut line = format!(
    "{} [{}] {}",
    paint(format!("#{}", issue.number), Style::new().bold()),
    format_state(&issue.state),
    issue.title
  );
  if !issue.labels.is_empty() {
    line.push_str(&format!(" ({})", format_label_names(&issue.labels)));
  }
  line
}

pub fn print_issue(issue: &Issue) {
  println!("{}", format_issue_line(issue));
  if let Some(user) = &issue.user {
    println!("  Author: {}", user.login);
  }
  if !issue.assignees.is_empty() {
    let assignees: Vec<&str> = issue.assignees.iter().map(|u| u.login.as_str()).collect();
    println!("  Assignees: {}", assignees.join(", "));
  }
  if let Some(milestone) = &issue.milestone {
    println!("  Milestone: {}", milestone.title);
  }
  println!("  Comments: {}", issue.comments);
  if let Some(url) = &issue.html_url {
    println!("  URL: {}", paint(url, Style::new().underline()));
  }
  if let Some(body) = issue.body.as_deref().filter(|b| !b.trim().is_empty()) {
    println!();
    println!("{body}");
  }
}

pub fn format_comment_line(comment: &IssueComment) -> String {
  let author = comment.user.as_ref().map_or("unknown", |u| u.login.as_str());
  let first_line = comment.body.lines().next().unwrap_or_default();
  format!(
    "{} {}: {}",
    paint(comment.id, Style::new().bold()),
    paint(author, Style::new().cyan()),
    first_line
  )
}

pub fn print_comment(comment: &IssueComment) {
  println!("{}", format_comment_line(comment));
  if comment.body.lines().count() > 1 {
    println!();
    println!("{}", comment.body);
  }
}

pub fn format_event_line(event: &IssueEvent) -> String {
  let actor = event.actor.as_ref().map_or("ghost", |u| u.login.as_str());
  let mut line = format!(
    "{} {} by {}",
    paint(event.id, Style::new().bold()),
    paint(&event.event, Style::new().yellow()),
    actor
  );
  if let Some(label) = &event.label {
    line.push_str(&format!(" [{}]", label.name));
  }
  if let Some(commit) = &event.commit_id {
    line.push_str(&format!(" @ {}", commit.chars().take(7).collect::<String>()));
  }
  line
}

pub fn format_milestone_line(milestone: &Milestone) -> String {
  let mut line = format!(
    "{} [{}] {} ({} open, {} closed)",
    paint(milestone.number, Style::new().bold()),
    format_state(&milestone.state),
    milestone.title,
    milestone.open_issues,
    milestone.closed_issues
  );
  if let Some(due_on) = &milestone.due_on {
    line.push_str(&format!(" due {due_on}"));
  }
  line
}

pub fn format_label_line(label: &Label) -> String {
  let color = label.color.as_deref().map(|c| format!("#{c}")).unwrap_or_default();
  let name = paint(&label.name, Style::new().cyan().bold());
  let color = paint(color, Style::new().dimmed());
  match label.description.as_deref().filter(|d| !d.is_empty()) {
    Some(description) => format!("{name} {color} {description}"),
    None => format!("{name} {color}"),
  }
}

#[cfg(test)]
mod tests {
  use ghissue_test_utils::fixtures::{comment_json, event_json, issue_json, label_json, milestone_json};

  use super::*;

  fn plain<F: FnOnce() -> String>(f: F) -> String {
    owo_colors::set_override(false);
    f()
  }

  #[test]
  fn test_get_emoji_or_default() {
    assert_eq!(get_emoji_or_default("nonexistent_emoji_name", "X"), "X");
    assert_ne!(get_emoji_or_default("warning", "X"), "X");
  }

  #[test]
  fn test_format_issue_line_with_labels() {
    let mut value = issue_json(12, "Crash on start");
    value["labels"] = serde_json::json!([label_json("bug", "d73a4a")]);
    let issue: Issue = serde_json::from_value(value).unwrap();

    assert_eq!(plain(|| format_issue_line(&issue)), "#12 [open] Crash on start (bug)");
  }

  #[test]
  fn test_format_event_line_shortens_commit() {
    let mut value = event_json(5, "referenced");
    value["commit_id"] = serde_json::json!("0123456789abcdef");
    let event: IssueEvent = serde_json::from_value(value).unwrap();

    assert_eq!(plain(|| format_event_line(&event)), "5 referenced by octocat @ 0123456");
  }

  #[test]
  fn test_plain_output_has_no_escape_codes() {
    let comment: IssueComment = serde_json::from_value(comment_json(900, "fixed\nsee #12")).unwrap();
    let line = plain(|| format_comment_line(&comment));
    assert!(!line.contains('\u{1b}'), "{line:?}");
    assert_eq!(line, "900 octocat: fixed");
  }

  #[test]
  fn test_format_milestone_and_label_lines() {
    let milestone: Milestone = serde_json::from_value(milestone_json(3, "v1.0")).unwrap();
    assert_eq!(plain(|| format_milestone_line(&milestone)), "3 [open] v1.0 (0 open, 0 closed)");

    let label: Label = serde_json::from_value(label_json("bug", "d73a4a")).unwrap();
    assert_eq!(plain(|| format_label_line(&label)), "bug #d73a4a");
  }
}
