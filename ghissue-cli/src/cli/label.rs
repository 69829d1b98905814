//! # Label Commands

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use ghissue::{LabelData, LabelListOptions};

use super::{GlobalArgs, RepoSession};
use crate::utils::output::{format_label_line, print_info, print_success};

#[derive(Args)]
pub struct LabelArgs {
  #[command(subcommand)]
  pub subcommand: LabelSubcommands,
}

#[derive(Subcommand)]
pub enum LabelSubcommands {
  /// List labels
  #[command(alias = "ls")]
  List,

  /// Show one label
  Get { name: String },

  /// Create a label
  Create {
    name: String,
    /// Hex colour, with or without a leading `#`
    #[arg(long, short = 'c')]
    color: String,
    #[arg(long, short = 'd')]
    description: Option<String>,
  },

  /// Change a label
  Edit {
    name: String,
    /// Rename the label
    #[arg(long)]
    new_name: Option<String>,
    #[arg(long, short = 'c')]
    color: Option<String>,
    #[arg(long, short = 'd')]
    description: Option<String>,
  },

  /// Delete a label
  #[command(alias = "rm")]
  Delete { name: String },
}

/// GitHub wants colours without the leading `#`
fn normalize_color(color: &str) -> String {
  color.trim_start_matches('#').to_lowercase()
}

pub(crate) fn handle_label_command(args: LabelArgs, global: &GlobalArgs) -> Result<()> {
  let session = RepoSession::connect(global)?;
  let issues = session.issues();

  match args.subcommand {
    LabelSubcommands::List => {
      let labels = session
        .rt
        .block_on(issues.list_labels(&LabelListOptions::default()))
        .with_context(|| format!("Failed to list labels in {}", session.repo))?;
      session.emit(&labels, |labels| {
        if labels.is_empty() {
          print_info("No labels found");
        }
        for label in labels {
          println!("{}", format_label_line(label));
        }
      })
    }
    LabelSubcommands::Get { name } => {
      let label = session
        .rt
        .block_on(issues.get_label(&name))
        .with_context(|| format!("Failed to fetch label '{name}' in {}", session.repo))?;
      session.emit(&label, |label| println!("{}", format_label_line(label)))
    }
    LabelSubcommands::Create {
      name,
      color,
      description,
    } => {
      let data = LabelData {
        name: Some(name),
        color: Some(normalize_color(&color)),
        description,
        ..LabelData::default()
      };
      let label = session
        .rt
        .block_on(issues.create_label(&data))
        .with_context(|| format!("Failed to create label in {}", session.repo))?;
      session.emit(&label, |label| {
        print_success(&format!("Created label {}", format_label_line(label)));
      })
    }
    LabelSubcommands::Edit {
      name,
      new_name,
      color,
      description,
    } => {
      let data = LabelData {
        new_name,
        color: color.as_deref().map(normalize_color),
        description,
        ..LabelData::default()
      };
      let label = session
        .rt
        .block_on(issues.edit_label(&name, &data))
        .with_context(|| format!("Failed to update label '{name}' in {}", session.repo))?;
      session.emit(&label, |label| {
        print_success(&format!("Updated label {}", format_label_line(label)));
      })
    }
    LabelSubcommands::Delete { name } => {
      let deleted = session
        .rt
        .block_on(issues.delete_label(&name))
        .with_context(|| format!("Failed to delete label '{name}' in {}", session.repo))?;
      session.emit(&deleted, |_| print_success(&format!("Deleted label '{name}'")))
    }
  }
}
