//! Version bumping and tag reconciliation
//!
//! [TagManager] is the workflow behind `version-tag`: it reads the version
//! from the manifest (or takes an explicit override), probes where the tag
//! already exists, evaluates [plan::plan], and then performs the deletions
//! and the commit/tag/push sequence through [GitCli].
//!
//! All paths are resolved against an explicit workspace root carried in
//! [ReleaseSettings]; nothing here consults the process working directory.

pub mod plan;

pub use plan::{plan, TagPlan, TagState};

use std::path::{Path, PathBuf};

use crate::boundary::BoundaryWarning;
use crate::config::{Config, GitConfig};
use crate::error::Result;
use crate::git::GitCli;
use crate::manifest::Manifest;
use crate::process::CommandRunner;
use crate::ui;
use crate::version::{self, VersionBump};

/// Static inputs of the tag manager.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseSettings {
    pub root: PathBuf,
    pub manifest_path: PathBuf,
    pub git: GitConfig,
}

impl ReleaseSettings {
    pub fn from_config(config: &Config, root: impl AsRef<Path>) -> Self {
        let root = root.as_ref().to_path_buf();
        ReleaseSettings {
            manifest_path: root.join(&config.manifest.path),
            root,
            git: config.git.clone(),
        }
    }
}

/// Result of a tag reconciliation that did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum TagOutcome {
    Published {
        tag: String,
        /// Whether staged changes were committed before tagging
        committed: bool,
        /// Where the tag existed before it was replaced
        previous: TagState,
    },
    Skipped {
        tag: String,
        warning: BoundaryWarning,
    },
}

impl TagOutcome {
    pub fn tag(&self) -> &str {
        match self {
            TagOutcome::Published { tag, .. } | TagOutcome::Skipped { tag, .. } => tag,
        }
    }
}

/// A version written to the manifest.
#[derive(Debug, Clone, PartialEq)]
pub struct BumpOutcome {
    pub previous: String,
    pub current: String,
}

pub struct TagManager<'r, R: CommandRunner + ?Sized> {
    runner: &'r R,
    settings: ReleaseSettings,
}

impl<'r, R: CommandRunner + ?Sized> TagManager<'r, R> {
    pub fn new(runner: &'r R, settings: ReleaseSettings) -> Self {
        TagManager { runner, settings }
    }

    pub fn settings(&self) -> &ReleaseSettings {
        &self.settings
    }

    fn git(&self) -> GitCli<'r, R> {
        GitCli::new(self.runner, &self.settings.root, self.settings.git.remote.clone())
    }

    /// The tag name to use: a validated override, or the manifest version.
    pub fn resolve_version(&self, explicit: Option<&str>) -> Result<String> {
        match explicit {
            Some(v) => {
                version::validate_version(v)?;
                ui::display_status(&format!("Using custom version: {}", v));
                Ok(v.to_string())
            }
            None => {
                let manifest = Manifest::load(&self.settings.manifest_path)?;
                Ok(manifest.version()?.to_string())
            }
        }
    }

    /// Probes where `tag` exists. A failed remote probe reads as "absent"
    /// unless `strict_remote_probe` is set.
    pub fn probe(&self, tag: &str) -> Result<TagState> {
        let git = self.git();
        let local = git.tag_exists_locally(tag);

        let remote = match git.probe_remote_tag(tag) {
            Ok(found) => found,
            Err(e) if self.settings.git.strict_remote_probe => return Err(e),
            Err(e) => {
                log::warn!("remote probe for {} failed: {}", tag, e);
                ui::display_boundary_warning(&BoundaryWarning::RemoteProbeFailed {
                    remote: git.remote().to_string(),
                    reason: e.to_string(),
                });
                false
            }
        };

        log::debug!("tag {}: local={} remote={}", tag, local, remote);
        Ok(TagState { local, remote })
    }

    /// Creates and pushes the release tag, reconciling any existing copy.
    pub fn create_version_tag(&self, explicit: Option<&str>, force: bool) -> Result<TagOutcome> {
        let tag = self.resolve_version(explicit)?;
        ui::display_status(&format!("Creating version tag for {}...", tag));

        let git = self.git();
        git.ensure_repository()?;

        let state = self.probe(&tag)?;
        let (delete_local, delete_remote) = match plan(&tag, git.remote(), state, force) {
            TagPlan::Skip(warning) => {
                ui::display_boundary_warning(&warning);
                return Ok(TagOutcome::Skipped { tag, warning });
            }
            TagPlan::Publish {
                delete_local,
                delete_remote,
            } => (delete_local, delete_remote),
        };

        match (state.local, state.remote) {
            (true, true) => ui::display_status(&format!(
                "Tag {} exists both locally and remotely. Force updating...",
                tag
            )),
            (true, false) => ui::display_status(&format!(
                "Tag {} exists locally but not remotely. Deleting local tag and creating fresh...",
                tag
            )),
            (false, true) => ui::display_status(&format!(
                "Tag {} exists remotely but not locally. Force updating...",
                tag
            )),
            (false, false) => {
                ui::display_status(&format!("Tag {} doesn't exist. Creating new tag...", tag))
            }
        }

        if delete_local {
            ui::display_status(&format!("Deleting local tag {}...", tag));
            git.delete_local_tag(&tag)?;
            ui::display_success(&format!("Local tag {} deleted", tag));
        }

        if delete_remote {
            ui::display_status(&format!("Deleting remote tag {}...", tag));
            git.delete_remote_tag(&tag)?;
            ui::display_success(&format!("Remote tag {} deleted", tag));
        }

        let committed = self.publish(&git, &tag)?;
        ui::display_success(&format!("Successfully created and pushed tag {}", tag));

        Ok(TagOutcome::Published {
            tag,
            committed,
            previous: state,
        })
    }

    /// Stage, commit if anything is staged, tag, push. Returns whether a
    /// commit was made.
    fn publish(&self, git: &GitCli<'r, R>, tag: &str) -> Result<bool> {
        ui::display_status("Adding changes to staging...");
        git.stage_all()?;

        let committed = if git.has_staged_changes()? {
            ui::display_status("Committing changes...");
            git.commit(&self.settings.git.commit_message_for(tag))?;
            true
        } else {
            ui::display_status("No changes to commit.");
            false
        };

        ui::display_status(&format!("Creating tag {}...", tag));
        git.create_annotated_tag(tag, &self.settings.git.tag_message_for(tag))?;

        ui::display_status(&format!("Pushing tag {} to {}...", tag, git.remote()));
        git.push_tag(tag)?;

        Ok(committed)
    }

    /// Bumps the manifest version in place.
    pub fn bump_manifest(&self, bump: VersionBump) -> Result<BumpOutcome> {
        let mut manifest = Manifest::load(&self.settings.manifest_path)?;
        let previous = manifest.version()?.to_string();
        let current = version::bump_version(&version::parse_version(&previous)?, bump)?.to_string();

        manifest.set_version(current.clone());
        manifest.save()?;

        ui::display_version_change(&previous, &current);
        ui::display_success(&format!(
            "Updated {} version to {}",
            manifest.path().display(),
            current
        ));

        Ok(BumpOutcome { previous, current })
    }

    /// Bumps the manifest, then tags the new version without force.
    pub fn update_version_and_tag(
        &self,
        bump: VersionBump,
        create_tag: bool,
    ) -> Result<(BumpOutcome, Option<TagOutcome>)> {
        let bumped = self.bump_manifest(bump)?;
        if !create_tag {
            return Ok((bumped, None));
        }
        let tagged = self.create_version_tag(None, false)?;
        Ok((bumped, Some(tagged)))
    }
}
