use std::path::Path;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};

use crate::config;
use crate::error::{ReleaseError, Result};
use crate::manifest::Manifest;
use crate::process::CommandRunner;
use crate::release::{BumpOutcome, ReleaseSettings, TagManager, TagOutcome};
use crate::version::VersionBump;

/// Positional keyword equivalent to `--force`.
pub const FORCE_KEYWORD: &str = "force-update";

const TAG_EXAMPLES: &str = "\
Version types:
  patch (default)  Increment patch version (x.x.X)
  minor            Increment minor version (x.X.0)
  major            Increment major version (X.0.0)

Examples:
  version-tag tag                       Tag the manifest version
  version-tag tag 3.3.0                 Tag a custom version
  version-tag tag 3.3.0 force-update    Recreate tag 3.3.0 locally and remotely
  version-tag tag -f                    Recreate the manifest version's tag
  version-tag update minor              Bump to the next minor version and tag it

If a tag was deleted on the remote but still exists locally, `tag` replaces
the local copy without needing force-update.";

#[derive(Parser, Debug)]
#[command(
    name = "version-tag",
    version,
    about = "Bump the manifest version and publish a matching git tag",
    after_help = TAG_EXAMPLES
)]
pub struct TagArgs {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<TagCommand>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum TagCommand {
    /// Create and push a tag for the current or a custom version
    Tag {
        #[arg(value_name = "VERSION | force-update")]
        words: Vec<String>,

        #[arg(short, long, help = "Recreate the tag if it already exists")]
        force: bool,
    },
    /// Bump the manifest version, then create and push its tag
    Update {
        #[arg(value_name = "patch|minor|major", default_value = "patch", value_parser = parse_bump)]
        kind: VersionBump,

        #[arg(long, help = "Only write the manifest; do not tag")]
        no_tag: bool,
    },
}

impl TagCommand {
    /// Prefix for the fatal error line.
    pub fn failure_context(&self) -> &'static str {
        match self {
            TagCommand::Tag { .. } => "Error creating version tag",
            TagCommand::Update { .. } => "Error updating version and creating tag",
        }
    }
}

fn parse_bump(s: &str) -> std::result::Result<VersionBump, String> {
    s.parse::<VersionBump>().map_err(|e| e.to_string())
}

/// What to do with a clap parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseFailure {
    /// `--help` / `--version`: let clap print and exit 0.
    ClapOutput,
    /// No or unknown subcommand: print usage, do nothing, exit 0.
    Usage,
    /// A recognised command with a bad value: exit 1.
    Fatal,
}

/// Classifies a parse failure of `args` (program name included).
///
/// An unknown argument is a usage problem only at the top level; once a
/// known subcommand has been named, it is a bad invocation of that command.
pub fn classify_parse_error(kind: ErrorKind, args: &[String]) -> ParseFailure {
    match kind {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ParseFailure::ClapOutput,
        ErrorKind::InvalidSubcommand
        | ErrorKind::MissingSubcommand
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => ParseFailure::Usage,
        ErrorKind::UnknownArgument if named_subcommand(args).is_none() => ParseFailure::Usage,
        _ => ParseFailure::Fatal,
    }
}

/// The first positional word of `args`, if it names a known subcommand.
/// Skips the program name and the global `-c/--config <path>` option.
fn named_subcommand(args: &[String]) -> Option<&str> {
    use clap::CommandFactory;

    let command = TagArgs::command();
    let mut words = args.iter().skip(1);

    while let Some(word) = words.next() {
        match word.as_str() {
            "-c" | "--config" => {
                words.next();
            }
            w if w.starts_with('-') => {}
            w => {
                return command
                    .get_subcommands()
                    .find(|sub| sub.get_name() == w)
                    .map(|_| w);
            }
        }
    }
    None
}

/// Version override and force flag for `tag`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TagRequest {
    pub version: Option<String>,
    pub force: bool,
}

impl TagRequest {
    /// Interprets `tag`'s positional words: at most one version plus the
    /// `force-update` keyword, in either order.
    pub fn from_words(words: &[String], force_flag: bool) -> Result<Self> {
        let mut request = TagRequest {
            version: None,
            force: force_flag,
        };

        for word in words {
            if word == FORCE_KEYWORD {
                request.force = true;
            } else if request.version.is_none() {
                request.version = Some(word.clone());
            } else {
                return Err(ReleaseError::usage(format!(
                    "unexpected argument '{}' (expected at most one version and '{}')",
                    word, FORCE_KEYWORD
                )));
            }
        }

        Ok(request)
    }
}

/// Successful result of a `version-tag` subcommand.
#[derive(Debug, Clone, PartialEq)]
pub enum TagRun {
    Tagged(TagOutcome),
    Updated(BumpOutcome, Option<TagOutcome>),
}

/// Runs one subcommand against `root`.
pub fn run<R: CommandRunner + ?Sized>(
    command: &TagCommand,
    config_path: Option<&str>,
    root: &Path,
    runner: &R,
) -> Result<TagRun> {
    let config = config::load_config(config_path, root)?;
    let manager = TagManager::new(runner, ReleaseSettings::from_config(&config, root));

    match command {
        TagCommand::Tag { words, force } => {
            let request = TagRequest::from_words(words, *force)?;
            let outcome = manager.create_version_tag(request.version.as_deref(), request.force)?;
            Ok(TagRun::Tagged(outcome))
        }
        TagCommand::Update { kind, no_tag } => {
            let (bumped, tagged) = manager.update_version_and_tag(*kind, !*no_tag)?;
            Ok(TagRun::Updated(bumped, tagged))
        }
    }
}

/// Usage text plus the manifest's current version, when it can be read.
pub fn usage(root: &Path) -> String {
    use clap::CommandFactory;

    let mut text = TagArgs::command().render_help().to_string();

    let current = config::load_config(None, root)
        .ok()
        .map(|cfg| root.join(cfg.manifest.path))
        .and_then(|path| Manifest::load(path).ok())
        .and_then(|m| m.version().ok().map(str::to_string));

    if let Some(version) = current {
        text.push_str(&format!("\nCurrent manifest version: {}\n", version));
    }
    text
}
