use anyhow::Result;
use clap::Parser;

use release_kit::cli::tag::{self, ParseFailure, TagArgs, TagRun};
use release_kit::process::SystemRunner;
use release_kit::release::TagOutcome;
use release_kit::ui;

fn main() -> Result<()> {
    ui::init_logging();

    let root = std::env::current_dir()?;

    let argv: Vec<String> = std::env::args_os()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();

    let args = match TagArgs::try_parse_from(&argv) {
        Ok(args) => args,
        Err(e) => match tag::classify_parse_error(e.kind(), &argv) {
            ParseFailure::ClapOutput => e.exit(),
            ParseFailure::Usage => {
                print!("{}", tag::usage(&root));
                return Ok(());
            }
            ParseFailure::Fatal => {
                ui::display_error(e.to_string().trim_end());
                std::process::exit(1);
            }
        },
    };

    let command = match args.command {
        Some(command) => command,
        None => {
            print!("{}", tag::usage(&root));
            return Ok(());
        }
    };

    let runner = SystemRunner::new();
    match tag::run(&command, args.config.as_deref(), &root, &runner) {
        Ok(TagRun::Tagged(TagOutcome::Skipped { tag, .. })) => {
            log::info!("tag {} left unchanged", tag);
        }
        Ok(run) => log::debug!("finished: {:?}", run),
        Err(e) => {
            ui::display_error(&format!("{}: {}", command.failure_context(), e));
            std::process::exit(1);
        }
    }

    Ok(())
}
