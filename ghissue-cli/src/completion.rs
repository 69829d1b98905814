//! # Shell Completion
//!
//! Generates shell completion scripts so ghissue commands and flags
//! tab-complete in bash, zsh, fish and PowerShell.

use std::io;

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{Shell, generate};

use crate::cli::Cli;

/// Write the completion script for `shell` to `out`
pub fn generate_completions(shell: Shell, out: &mut dyn io::Write) -> Result<()> {
  let mut cmd = Cli::command();
  let app_name = cmd.get_name().to_string();

  generate(shell, &mut cmd, app_name, out);

  Ok(())
}
