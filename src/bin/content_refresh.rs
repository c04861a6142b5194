use anyhow::Result;
use clap::Parser;

use release_kit::cli::refresh::{self, RefreshArgs, FAILURE_CONTEXT};
use release_kit::process::SystemRunner;
use release_kit::ui;

fn main() -> Result<()> {
    ui::init_logging();

    let args = RefreshArgs::parse();
    let root = std::env::current_dir()?;

    let runner = SystemRunner::new();
    if let Err(e) = refresh::run(&args, &root, &runner) {
        ui::display_error(&format!("{}: {}", FAILURE_CONTEXT, e));
        std::process::exit(1);
    }

    Ok(())
}
