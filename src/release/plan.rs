//! Tag reconciliation decision table - pure, no git access.

use crate::boundary::BoundaryWarning;

/// Where a tag currently exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagState {
    pub local: bool,
    pub remote: bool,
}

impl TagState {
    pub fn new(local: bool, remote: bool) -> Self {
        TagState { local, remote }
    }
}

/// What the reconciler will do for a tag.
#[derive(Debug, Clone, PartialEq)]
pub enum TagPlan {
    /// Leave everything as it is.
    Skip(BoundaryWarning),
    /// Run the listed deletions (local first), then commit, tag and push.
    Publish {
        delete_local: bool,
        delete_remote: bool,
    },
}

impl TagPlan {
    pub fn is_skip(&self) -> bool {
        matches!(self, TagPlan::Skip(_))
    }
}

/// Evaluates the decision table for `tag`.
///
/// | local | remote | force | plan |
/// |---|---|---|---|
/// | yes | yes | no  | skip |
/// | yes | yes | yes | delete local + remote, publish |
/// | yes | no  | any | delete local, publish |
/// | no  | yes | no  | skip |
/// | no  | yes | yes | delete remote, publish |
/// | no  | no  | any | publish |
pub fn plan(tag: &str, remote: &str, state: TagState, force: bool) -> TagPlan {
    match (state.local, state.remote, force) {
        (true, true, false) => TagPlan::Skip(BoundaryWarning::TagExistsEverywhere {
            tag: tag.to_string(),
        }),
        (false, true, false) => TagPlan::Skip(BoundaryWarning::TagExistsRemotelyOnly {
            tag: tag.to_string(),
            remote: remote.to_string(),
        }),
        (local, remote_exists, _) => TagPlan::Publish {
            delete_local: local,
            delete_remote: remote_exists,
        },
    }
}
