//! Shared helpers for command handlers.

use std::io::{IsTerminal, Read};
use std::path::Path;
use std::time::Duration;

use indicatif::ProgressBar;

use nginsight_core::{Session, SiteDataDocument};
use nginsight_host::LocalHost;

use crate::cli::Ctx;
use crate::error::CliError;

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Read content from a local file, or stdin when the path is `-`.
pub fn read_content(path: &Path) -> Result<String, CliError> {
    if path.as_os_str() == "-" {
        let mut content = String::new();
        std::io::stdin().read_to_string(&mut content)?;
        Ok(content)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

/// Run the site scan with a spinner on interactive terminals.
pub async fn fetch_with_spinner(
    session: &Session<LocalHost>,
    ctx: &Ctx,
) -> Result<SiteDataDocument, CliError> {
    let spinner = if !ctx.quiet && std::io::stderr().is_terminal() {
        let pb = ProgressBar::new_spinner();
        pb.set_message("Scanning nginx sites...");
        pb.enable_steady_tick(Duration::from_millis(120));
        Some(pb)
    } else {
        None
    };

    let result = session.fetch_site_data().await;

    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    Ok(result?)
}
