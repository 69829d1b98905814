//! # Completion Command

use std::io;

use anyhow::Result;
use clap::Args;
use clap_complete::Shell;

use crate::completion::generate_completions;

/// Command for generating shell completions
#[derive(Args)]
pub struct CompletionArgs {
  /// Shell to generate completions for
  #[arg(value_enum)]
  pub shell: Shell,
}

pub(crate) fn handle_completion_command(completion: CompletionArgs) -> Result<()> {
  generate_completions(completion.shell, &mut io::stdout())
}
