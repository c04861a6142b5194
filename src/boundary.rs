use std::fmt;
use std::path::PathBuf;

/// Non-fatal conditions met at the boundary between this tool and the
/// repository, its remote, or the export directory. These are reported to
/// the operator but never abort the run.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// Tag is present locally and on the remote, and force was not given
    TagExistsEverywhere { tag: String },
    /// Tag is present only on the remote, and force was not given
    TagExistsRemotelyOnly { tag: String, remote: String },
    /// `git ls-remote` failed; the tag is assumed absent remotely
    RemoteProbeFailed { remote: String, reason: String },
    /// The export command succeeded but left no content directory behind
    ContentDirMissing { dir: PathBuf },
}

impl BoundaryWarning {
    /// Follow-up hint shown under the warning, if there is one.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            BoundaryWarning::TagExistsEverywhere { .. } => {
                Some("Use force-update to update the existing tag")
            }
            BoundaryWarning::TagExistsRemotelyOnly { .. } => {
                Some("Use force-update to update the remote tag")
            }
            BoundaryWarning::RemoteProbeFailed { .. } => {
                Some("Set git.strict_remote_probe = true to make this fatal")
            }
            BoundaryWarning::ContentDirMissing { .. } => None,
        }
    }
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::TagExistsEverywhere { tag } => {
                write!(f, "Tag {} exists both locally and remotely. Skipping", tag)
            }
            BoundaryWarning::TagExistsRemotelyOnly { tag, remote } => {
                write!(
                    f,
                    "Tag {} exists on '{}' but not locally. Skipping",
                    tag, remote
                )
            }
            BoundaryWarning::RemoteProbeFailed { remote, reason } => {
                write!(
                    f,
                    "Could not list tags on '{}' ({}); treating tag as absent remotely",
                    remote, reason
                )
            }
            BoundaryWarning::ContentDirMissing { dir } => {
                write!(f, "Content directory was not created: {}", dir.display())
            }
        }
    }
}
