//! # Command Line Interface
//!
//! Defines the CLI structure and command handlers for ghissue: one
//! subcommand group per API resource, plus credential checks and shell
//! completions.

mod check;
mod comment;
mod completion;
mod issue;
mod label;
mod milestone;

use anyhow::Result;
use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{ArgAction, Args, Parser, Subcommand};
use ghissue::{ClientConfig, GitHubClient, Issues, RepoId};
use serde::Serialize;
use tokio::runtime::Runtime;

use crate::clients::{create_runtime_and_client, load_config, resolve_repo};
use crate::utils::output::{ColorMode, print_json};

/// Top-level CLI command for ghissue
#[derive(Parser)]
#[command(name = "ghissue")]
#[command(about = "Work with GitHub issues, comments, milestones and labels")]
#[command(
  long_about = "ghissue talks to the GitHub Issues REST API.\n\n\
        Credentials come from GITHUB_TOKEN / GH_TOKEN or a .netrc entry for\n\
        api.github.com or github.com; without either, requests are anonymous."
)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(propagate_version = true)]
#[command(subcommand_required(true))]
#[command(disable_help_subcommand = true)]
#[command(max_term_width = 120)]
#[command(styles = Styles::styled()
    .header(AnsiColor::BrightGreen.on_default().bold().underline())
    .usage(AnsiColor::Green.on_default().bold())
    .literal(AnsiColor::BrightGreen.on_default().bold())
    .placeholder(AnsiColor::BrightWhite.on_default().italic())
    .valid(AnsiColor::Green.on_default())
    .invalid(AnsiColor::BrightRed.on_default().bold())
)]
pub struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    global = true,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show info level messages\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages"
  )]
  pub verbose: u8,

  /// Controls when colored output is used
  #[arg(long, value_enum, ignore_case = true, global = true, default_value_t = ColorMode::Auto)]
  pub colors: ColorMode,

  #[command(flatten)]
  pub global: GlobalArgs,

  #[command(subcommand)]
  pub command: Commands,
}

/// Options shared by every API command
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
  /// Target repository as owner/repo or a GitHub URL
  #[arg(long, short = 'R', global = true, value_name = "OWNER/REPO")]
  pub repo: Option<String>,

  /// Print results as pretty JSON (only the fields ghissue models are kept)
  #[arg(long, global = true)]
  pub json: bool,
}

/// Subcommands for ghissue
#[derive(Subcommand)]
pub enum Commands {
  /// Check that GitHub accepts the discovered credentials
  Check,

  /// Issue comments
  #[command(arg_required_else_help = true)]
  Comment(comment::CommentArgs),

  /// Generate shell completions
  Completion(completion::CompletionArgs),

  /// Issues
  #[command(arg_required_else_help = true)]
  Issue(issue::IssueArgs),

  /// Repository labels
  #[command(arg_required_else_help = true)]
  Label(label::LabelArgs),

  /// Repository milestones
  #[command(arg_required_else_help = true)]
  Milestone(milestone::MilestoneArgs),
}

pub fn handle_cli(cli: Cli) -> Result<()> {
  match cli.colors {
    ColorMode::Always => owo_colors::set_override(true),
    ColorMode::Never => owo_colors::set_override(false),
    ColorMode::Auto => {}
  }

  match cli.command {
    Commands::Check => check::handle_check_command(),
    Commands::Comment(comment) => comment::handle_comment_command(comment, &cli.global),
    Commands::Completion(completion) => completion::handle_completion_command(completion),
    Commands::Issue(issue) => issue::handle_issue_command(issue, &cli.global),
    Commands::Label(label) => label::handle_label_command(label, &cli.global),
    Commands::Milestone(milestone) => milestone::handle_milestone_command(milestone, &cli.global),
  }
}

/// Everything a repository-scoped command needs to talk to the API
pub(crate) struct RepoSession {
  pub rt: Runtime,
  pub client: GitHubClient,
  pub repo: RepoId,
  pub json: bool,
}

impl RepoSession {
  pub fn connect(global: &GlobalArgs) -> Result<Self> {
    let config: ClientConfig = load_config()?;
    let repo = resolve_repo(global.repo.as_deref(), &config)?;
    let (rt, client) = create_runtime_and_client(&config)?;
    Ok(Self {
      rt,
      client,
      repo,
      json: global.json,
    })
  }

  pub fn issues(&self) -> Issues<'_> {
    self.client.issues(self.repo.clone())
  }

  /// Print `value` as JSON under `--json`, otherwise through `human`
  pub fn emit<T: Serialize + ?Sized>(&self, value: &T, human: impl FnOnce(&T)) -> Result<()> {
    if self.json {
      print_json(value)
    } else {
      human(value);
      Ok(())
    }
  }
}
