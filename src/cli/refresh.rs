use std::path::Path;

use clap::Parser;

use crate::config;
use crate::content::{ContentRefresher, RefreshOutcome, RefreshSettings};
use crate::error::Result;
use crate::process::CommandRunner;

const REFRESH_NOTES: &str = "\
Runs `csdx cm:export -k <stack API key> -d content` from the current directory
after deleting ./content. The program, subcommand, directory and key are read
from the [content] section of releasekit.toml; CONTENT_STACK_API_KEY overrides
the key.";

#[derive(Parser, Debug)]
#[command(
    name = "content-refresh",
    version,
    about = "Delete the content directory and export fresh content",
    after_help = REFRESH_NOTES
)]
pub struct RefreshArgs {
    #[arg(short, long, help = "Custom configuration file path")]
    pub config: Option<String>,
}

/// Prefix for the fatal error line.
pub const FAILURE_CONTEXT: &str = "Error updating content directory";

/// Loads configuration and refreshes the content directory under `root`.
pub fn run<R: CommandRunner + ?Sized>(
    args: &RefreshArgs,
    root: &Path,
    runner: &R,
) -> Result<RefreshOutcome> {
    let config = config::load_config(args.config.as_deref(), root)?;
    let settings = RefreshSettings::from_config(&config, root)?;
    ContentRefresher::new(runner, settings).refresh()
}
