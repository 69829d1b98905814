//! # Check Command
//!
//! Verifies the discovered credential against `GET /user`.

use anyhow::{Context, Result, bail};
use ghissue::Credential;

use crate::clients::{create_runtime_and_client, load_config};
use crate::utils::output::{print_error, print_info, print_success, print_warning};

pub(crate) fn handle_check_command() -> Result<()> {
  let config = load_config()?;
  let (rt, client) = create_runtime_and_client(&config)?;

  match client.credential() {
    Credential::Anonymous => {
      print_warning("No credentials found; set GITHUB_TOKEN or add api.github.com to ~/.netrc");
      return Ok(());
    }
    Credential::Token(_) => print_info("Using token from the environment"),
    Credential::Basic { username, .. } => print_info(&format!("Using .netrc login '{username}'")),
  }

  let authenticated = rt
    .block_on(client.test_connection())
    .with_context(|| format!("Failed to reach {}", client.base_url()))?;
  if !authenticated {
    print_error("GitHub rejected the credentials");
    bail!("Authentication failed");
  }

  let user = rt
    .block_on(client.get_current_user())
    .context("Failed to get user information")?;
  print_success("Successfully authenticated with GitHub");
  println!("  Username: {}", user.login);
  if let Some(name) = user.name {
    println!("  Name: {name}");
  }
  println!("  User ID: {}", user.id);

  Ok(())
}
