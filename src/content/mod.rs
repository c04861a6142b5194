//! Content export directory refresher
//!
//! Wipes the export directory, runs the content-export CLI to repopulate
//! it, and counts what came back.

pub mod stats;

pub use stats::{count_entries, ContentStats};

use std::fs;
use std::path::{Path, PathBuf};

use crate::boundary::BoundaryWarning;
use crate::config::Config;
use crate::error::{ReleaseError, Result};
use crate::process::{CommandLine, CommandRunner, OutputMode};
use crate::ui;

/// Static inputs of the refresher.
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshSettings {
    pub root: PathBuf,
    pub content_dir: PathBuf,
    pub export: CommandLine,
}

impl RefreshSettings {
    /// Builds `<program> <subcommand> -k <key> -d <dir>`, run from `root`.
    ///
    /// Fails before anything is touched when no stack API key is configured.
    pub fn from_config(config: &Config, root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        let content = &config.content;
        let key = content.require_stack_key()?;

        let export = CommandLine::new(&content.program)
            .arg(&content.subcommand)
            .args(["-k", key, "-d", content.dir.as_str()])
            .current_dir(&root);

        Ok(RefreshSettings {
            content_dir: root.join(&content.dir),
            root,
            export,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RefreshOutcome {
    /// Export finished and the directory holds these entries.
    Exported(ContentStats),
    /// Export finished but left no directory behind.
    Missing(BoundaryWarning),
}

pub struct ContentRefresher<'r, R: CommandRunner + ?Sized> {
    runner: &'r R,
    settings: RefreshSettings,
}

impl<'r, R: CommandRunner + ?Sized> ContentRefresher<'r, R> {
    pub fn new(runner: &'r R, settings: RefreshSettings) -> Self {
        ContentRefresher { runner, settings }
    }

    pub fn settings(&self) -> &RefreshSettings {
        &self.settings
    }

    /// Removes whatever sits at the content path. Returns whether anything
    /// was there. A file or symlink in place of the directory is removed
    /// itself; a link's target is left alone.
    pub fn clear(&self) -> Result<bool> {
        let dir = &self.settings.content_dir;
        ui::display_status("Deleting existing content directory...");

        let metadata = match fs::symlink_metadata(dir) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                ui::display_status("Content directory does not exist");
                return Ok(false);
            }
            Err(e) => return Err(delete_error(dir, e)),
        };

        let removed = if metadata.is_dir() {
            fs::remove_dir_all(dir)
        } else {
            log::debug!("{} is not a directory; removing it", dir.display());
            fs::remove_file(dir)
        };
        removed.map_err(|e| delete_error(dir, e))?;

        ui::display_success("Content directory deleted successfully");
        Ok(true)
    }

    /// Runs the export command with inherited stdio.
    pub fn export(&self) -> Result<()> {
        let export = &self.settings.export;
        ui::display_status("Starting fresh content export...");
        ui::display_status(&format!("Running: {}", export));

        let output = self
            .runner
            .run(export, OutputMode::Inherit)
            .map_err(|e| ReleaseError::export(format!("'{}': {}", export, e)))?;

        if !output.success() {
            return Err(ReleaseError::export(format!(
                "'{}' failed with {}",
                export,
                output.describe_failure()
            )));
        }

        ui::display_success("Content export completed successfully!");
        Ok(())
    }

    /// Delete, export, then count.
    pub fn refresh(&self) -> Result<RefreshOutcome> {
        self.clear()?;
        self.export()?;

        let dir = &self.settings.content_dir;
        if !dir.is_dir() {
            let warning = BoundaryWarning::ContentDirMissing { dir: dir.clone() };
            ui::display_boundary_warning(&warning);
            return Ok(RefreshOutcome::Missing(warning));
        }

        ui::display_success("New content directory created");
        let stats = count_entries(dir);
        ui::display_export_summary(&stats);
        Ok(RefreshOutcome::Exported(stats))
    }
}

fn delete_error(path: &Path, e: std::io::Error) -> ReleaseError {
    ReleaseError::Io(std::io::Error::new(
        e.kind(),
        format!("cannot delete '{}': {}", path.display(), e),
    ))
}
