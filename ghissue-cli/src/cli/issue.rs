//! # Issue Commands
//!
//! Create, list, inspect and update issues, and show their event history.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use ghissue::{IssueData, IssueListOptions};

use super::{GlobalArgs, RepoSession};
use crate::utils::output::{format_event_line, format_issue_line, print_info, print_issue, print_success};

#[derive(Args)]
pub struct IssueArgs {
  #[command(subcommand)]
  pub subcommand: IssueSubcommands,
}

#[derive(Subcommand)]
pub enum IssueSubcommands {
  /// Open a new issue
  Create {
    #[arg(long, short = 't')]
    title: String,
    #[arg(long, short = 'b')]
    body: Option<String>,
    /// Label to apply (repeatable)
    #[arg(long = "label", short = 'l')]
    labels: Vec<String>,
    /// Login to assign (repeatable)
    #[arg(long = "assignee", short = 'a')]
    assignees: Vec<String>,
    /// Milestone number
    #[arg(long)]
    milestone: Option<u64>,
  },

  /// List issues, following every page
  #[command(alias = "ls")]
  List {
    /// open, closed or all
    #[arg(long, short = 's')]
    state: Option<String>,
    /// Comma-separated label names
    #[arg(long, value_delimiter = ',')]
    labels: Vec<String>,
    #[arg(long)]
    assignee: Option<String>,
    #[arg(long)]
    creator: Option<String>,
    /// Milestone number, `*` or `none`
    #[arg(long)]
    milestone: Option<String>,
    /// created, updated or comments
    #[arg(long)]
    sort: Option<String>,
    /// asc or desc
    #[arg(long)]
    direction: Option<String>,
    /// Only issues updated at or after this ISO 8601 timestamp
    #[arg(long)]
    since: Option<String>,
    #[arg(long)]
    per_page: Option<u32>,
  },

  /// Show one issue
  #[command(alias = "view")]
  Get { number: u64 },

  /// Change fields of an issue; unset flags are left alone
  Edit {
    number: u64,
    #[command(flatten)]
    fields: EditFields,
  },

  /// Close an issue
  Close { number: u64 },

  /// Reopen a closed issue
  Reopen { number: u64 },

  /// Show the event history of an issue
  Events { number: u64 },
}

#[derive(Args, Default)]
pub struct EditFields {
  #[arg(long, short = 't')]
  title: Option<String>,
  #[arg(long, short = 'b')]
  body: Option<String>,
  /// open or closed
  #[arg(long, short = 's')]
  state: Option<String>,
  /// Replace all labels (repeatable)
  #[arg(long = "label", short = 'l')]
  labels: Vec<String>,
  /// Replace all assignees (repeatable)
  #[arg(long = "assignee", short = 'a')]
  assignees: Vec<String>,
  #[arg(long)]
  milestone: Option<u64>,
}

impl From<EditFields> for IssueData {
  fn from(fields: EditFields) -> Self {
    Self {
      title: fields.title,
      body: fields.body,
      state: fields.state,
      labels: (!fields.labels.is_empty()).then_some(fields.labels),
      assignees: (!fields.assignees.is_empty()).then_some(fields.assignees),
      milestone: fields.milestone,
    }
  }
}

pub(crate) fn handle_issue_command(args: IssueArgs, global: &GlobalArgs) -> Result<()> {
  let session = RepoSession::connect(global)?;
  let issues = session.issues();

  match args.subcommand {
    IssueSubcommands::Create {
      title,
      body,
      labels,
      assignees,
      milestone,
    } => {
      let data = IssueData {
        title: Some(title),
        body,
        labels: (!labels.is_empty()).then_some(labels),
        assignees: (!assignees.is_empty()).then_some(assignees),
        milestone,
        ..IssueData::default()
      };
      let issue = session
        .rt
        .block_on(issues.create_issue(&data))
        .with_context(|| format!("Failed to create issue in {}", session.repo))?;
      session.emit(&issue, |issue| print_success(&format!("Created {}", format_issue_line(issue))))
    }
    IssueSubcommands::List {
      state,
      labels,
      assignee,
      creator,
      milestone,
      sort,
      direction,
      since,
      per_page,
    } => {
      let options = IssueListOptions {
        state,
        labels,
        assignee,
        creator,
        milestone,
        sort,
        direction,
        since,
        per_page,
        ..IssueListOptions::default()
      };
      let found = session
        .rt
        .block_on(issues.list_issues(&options))
        .with_context(|| format!("Failed to list issues in {}", session.repo))?;
      session.emit(&found, |found| {
        if found.is_empty() {
          print_info("No issues found");
        }
        for issue in found {
          println!("{}", format_issue_line(issue));
        }
      })
    }
    IssueSubcommands::Get { number } => {
      let issue = session
        .rt
        .block_on(issues.get_issue(number))
        .with_context(|| format!("Failed to fetch issue #{number} in {}", session.repo))?;
      session.emit(&issue, print_issue)
    }
    IssueSubcommands::Edit { number, fields } => edit(&session, number, fields.into()),
    IssueSubcommands::Close { number } => edit(&session, number, state_change("closed")),
    IssueSubcommands::Reopen { number } => edit(&session, number, state_change("open")),
    IssueSubcommands::Events { number } => {
      let events = session
        .rt
        .block_on(issues.list_issue_events(number))
        .with_context(|| format!("Failed to list events for #{number} in {}", session.repo))?;
      session.emit(&events, |events| {
        if events.is_empty() {
          print_info("No events recorded");
        }
        for event in events {
          println!("{}", format_event_line(event));
        }
      })
    }
  }
}

fn state_change(state: &str) -> IssueData {
  IssueData {
    state: Some(state.to_string()),
    ..IssueData::default()
  }
}

fn edit(session: &RepoSession, number: u64, data: IssueData) -> Result<()> {
  let issue = session
    .rt
    .block_on(session.issues().edit_issue(number, &data))
    .with_context(|| format!("Failed to update issue #{number} in {}", session.repo))?;
  session.emit(&issue, |issue| print_success(&format!("Updated {}", format_issue_line(issue))))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_edit_fields_only_carry_set_values() {
    let fields = EditFields {
      state: Some("closed".to_string()),
      ..EditFields::default()
    };
    let data = IssueData::from(fields);

    assert_eq!(data, state_change("closed"));
    assert_eq!(serde_json::to_value(&data).unwrap(), serde_json::json!({"state": "closed"}));
  }
}
