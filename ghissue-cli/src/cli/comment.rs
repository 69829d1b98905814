//! # Comment Commands

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use super::{GlobalArgs, RepoSession};
use crate::utils::output::{format_comment_line, print_comment, print_info, print_success};

#[derive(Args)]
pub struct CommentArgs {
  #[command(subcommand)]
  pub subcommand: CommentSubcommands,
}

#[derive(Subcommand)]
pub enum CommentSubcommands {
  /// List the comments on an issue
  #[command(alias = "ls")]
  List {
    /// Issue number
    issue: u64,
  },

  /// Show one comment
  Get {
    /// Comment id
    id: u64,
  },

  /// Comment on an issue
  Create {
    /// Issue number
    issue: u64,
    body: String,
  },

  /// Replace the body of a comment
  Edit {
    /// Comment id
    id: u64,
    body: String,
  },

  /// Delete a comment
  #[command(alias = "rm")]
  Delete {
    /// Comment id
    id: u64,
  },
}

pub(crate) fn handle_comment_command(args: CommentArgs, global: &GlobalArgs) -> Result<()> {
  let session = RepoSession::connect(global)?;
  let issues = session.issues();

  match args.subcommand {
    CommentSubcommands::List { issue } => {
      let comments = session
        .rt
        .block_on(issues.list_issue_comments(issue))
        .with_context(|| format!("Failed to list comments on #{issue} in {}", session.repo))?;
      session.emit(&comments, |comments| {
        if comments.is_empty() {
          print_info("No comments");
        }
        for comment in comments {
          println!("{}", format_comment_line(comment));
        }
      })
    }
    CommentSubcommands::Get { id } => {
      let comment = session
        .rt
        .block_on(issues.get_issue_comment(id))
        .with_context(|| format!("Failed to fetch comment {id} in {}", session.repo))?;
      session.emit(&comment, print_comment)
    }
    CommentSubcommands::Create { issue, body } => {
      let comment = session
        .rt
        .block_on(issues.create_issue_comment(issue, &body))
        .with_context(|| format!("Failed to comment on #{issue} in {}", session.repo))?;
      session.emit(&comment, |comment| {
        print_success(&format!("Added comment {} to #{issue}", comment.id));
      })
    }
    CommentSubcommands::Edit { id, body } => {
      let comment = session
        .rt
        .block_on(issues.edit_issue_comment(id, &body))
        .with_context(|| format!("Failed to edit comment {id} in {}", session.repo))?;
      session.emit(&comment, |comment| {
        print_success(&format!("Updated comment {}", comment.id));
      })
    }
    CommentSubcommands::Delete { id } => {
      let deleted = session
        .rt
        .block_on(issues.delete_issue_comment(id))
        .with_context(|| format!("Failed to delete comment {id} in {}", session.repo))?;
      session.emit(&deleted, |_| print_success(&format!("Deleted comment {id}")))
    }
  }
}
