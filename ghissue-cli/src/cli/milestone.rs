//! # Milestone Commands

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use ghissue::{MilestoneData, MilestoneListOptions};

use super::{GlobalArgs, RepoSession};
use crate::utils::output::{format_milestone_line, print_info, print_success};

#[derive(Args)]
pub struct MilestoneArgs {
  #[command(subcommand)]
  pub subcommand: MilestoneSubcommands,
}

#[derive(Subcommand)]
pub enum MilestoneSubcommands {
  /// List milestones
  #[command(alias = "ls")]
  List {
    /// open, closed or all
    #[arg(long, short = 's')]
    state: Option<String>,
    /// due_on or completeness
    #[arg(long)]
    sort: Option<String>,
    /// asc or desc
    #[arg(long)]
    direction: Option<String>,
  },

  /// Show one milestone
  Get { number: u64 },

  /// Create a milestone
  Create {
    #[arg(long, short = 't')]
    title: String,
    #[command(flatten)]
    fields: MilestoneFields,
  },

  /// Change fields of a milestone
  Edit {
    number: u64,
    #[arg(long, short = 't')]
    title: Option<String>,
    #[command(flatten)]
    fields: MilestoneFields,
  },

  /// Delete a milestone
  #[command(alias = "rm")]
  Delete { number: u64 },
}

#[derive(Args)]
pub struct MilestoneFields {
  /// open or closed
  #[arg(long, short = 's')]
  state: Option<String>,
  #[arg(long, short = 'd')]
  description: Option<String>,
  /// Due date as an ISO 8601 timestamp
  #[arg(long)]
  due_on: Option<String>,
}

impl MilestoneFields {
  fn into_data(self, title: Option<String>) -> MilestoneData {
    MilestoneData {
      title,
      state: self.state,
      description: self.description,
      due_on: self.due_on,
    }
  }
}

pub(crate) fn handle_milestone_command(args: MilestoneArgs, global: &GlobalArgs) -> Result<()> {
  let session = RepoSession::connect(global)?;
  let issues = session.issues();

  match args.subcommand {
    MilestoneSubcommands::List { state, sort, direction } => {
      let options = MilestoneListOptions {
        state,
        sort,
        direction,
        per_page: None,
      };
      let milestones = session
        .rt
        .block_on(issues.list_milestones(&options))
        .with_context(|| format!("Failed to list milestones in {}", session.repo))?;
      session.emit(&milestones, |milestones| {
        if milestones.is_empty() {
          print_info("No milestones found");
        }
        for milestone in milestones {
          println!("{}", format_milestone_line(milestone));
        }
      })
    }
    MilestoneSubcommands::Get { number } => {
      let milestone = session
        .rt
        .block_on(issues.get_milestone(number))
        .with_context(|| format!("Failed to fetch milestone {number} in {}", session.repo))?;
      session.emit(&milestone, |milestone| {
        println!("{}", format_milestone_line(milestone));
        if let Some(description) = milestone.description.as_deref().filter(|d| !d.is_empty()) {
          println!("  {description}");
        }
      })
    }
    MilestoneSubcommands::Create { title, fields } => {
      let milestone = session
        .rt
        .block_on(issues.create_milestone(&fields.into_data(Some(title))))
        .with_context(|| format!("Failed to create milestone in {}", session.repo))?;
      session.emit(&milestone, |milestone| {
        print_success(&format!("Created {}", format_milestone_line(milestone)));
      })
    }
    MilestoneSubcommands::Edit { number, title, fields } => {
      let milestone = session
        .rt
        .block_on(issues.edit_milestone(number, &fields.into_data(title)))
        .with_context(|| format!("Failed to update milestone {number} in {}", session.repo))?;
      session.emit(&milestone, |milestone| {
        print_success(&format!("Updated {}", format_milestone_line(milestone)));
      })
    }
    MilestoneSubcommands::Delete { number } => {
      let deleted = session
        .rt
        .block_on(issues.delete_milestone(number))
        .with_context(|| format!("Failed to delete milestone {number} in {}", session.repo))?;
      session.emit(&deleted, |_| print_success(&format!("Deleted milestone {number}")))
    }
  }
}
