//! Git operations driven through the `git` binary
//!
//! [GitCli] wraps a [CommandRunner] and speaks to git purely through exit
//! codes (plus `ls-remote` output for the remote probe). It holds no state
//! beyond the repository root and the remote name.
//!
//! Two kinds of call live here:
//!
//! - **Probes** ([GitCli::tag_exists_locally], [GitCli::probe_remote_tag],
//!   [GitCli::has_staged_changes]) capture output and never mutate.
//! - **Mutations** (stage, commit, tag, push, delete) inherit stdio so git's
//!   own progress reaches the operator, and turn a non-zero exit into
//!   [ReleaseError::Git].

use std::path::{Path, PathBuf};

use crate::error::{ReleaseError, Result};
use crate::process::{CommandLine, CommandOutput, CommandRunner, OutputMode};

const GIT: &str = "git";

pub struct GitCli<'r, R: CommandRunner + ?Sized> {
    runner: &'r R,
    root: PathBuf,
    remote: String,
}

impl<'r, R: CommandRunner + ?Sized> GitCli<'r, R> {
    pub fn new(runner: &'r R, root: impl AsRef<Path>, remote: impl Into<String>) -> Self {
        GitCli {
            runner,
            root: root.as_ref().to_path_buf(),
            remote: remote.into(),
        }
    }

    pub fn remote(&self) -> &str {
        &self.remote
    }

    fn command<I, S>(&self, args: I) -> CommandLine
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CommandLine::new(GIT).args(args).current_dir(&self.root)
    }

    fn capture<I, S>(&self, args: I) -> Result<CommandOutput>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.runner.run(&self.command(args), OutputMode::Capture)
    }

    /// Run a mutating step; a non-zero exit becomes a `Git` error naming `step`.
    fn mutate<I, S>(&self, step: &str, args: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let cmd = self.command(args);
        let output = self
            .runner
            .run(&cmd, OutputMode::Inherit)
            .map_err(|e| ReleaseError::git(format!("{}: {}", step, e)))?;

        if output.success() {
            Ok(())
        } else {
            Err(ReleaseError::git(format!(
                "{} ('{}') failed with {}",
                step,
                cmd,
                output.describe_failure()
            )))
        }
    }

    /// Fails with [ReleaseError::NotARepository] unless `git status` succeeds.
    pub fn ensure_repository(&self) -> Result<()> {
        match self.capture(["status"]) {
            Ok(output) if output.success() => Ok(()),
            Ok(output) => {
                log::debug!("git status: {}", output.describe_failure());
                Err(ReleaseError::NotARepository)
            }
            Err(e) => {
                log::debug!("git status could not run: {}", e);
                Err(ReleaseError::NotARepository)
            }
        }
    }

    /// Whether `refs/tags/<tag>` resolves locally. Any failure reads as "no".
    pub fn tag_exists_locally(&self, tag: &str) -> bool {
        let reference = format!("refs/tags/{}", tag);
        match self.capture(["rev-parse", "--verify", "--quiet", reference.as_str()]) {
            Ok(output) => output.success(),
            Err(e) => {
                log::debug!("local tag probe for {} could not run: {}", tag, e);
                false
            }
        }
    }

    /// Lists `refs/tags/<tag>` on the remote.
    ///
    /// `Ok(true)`/`Ok(false)` when `ls-remote` ran cleanly; `Err` when it
    /// could not run or exited non-zero (network, auth, unknown remote).
    /// Callers decide whether that error is fatal.
    pub fn probe_remote_tag(&self, tag: &str) -> Result<bool> {
        let reference = format!("refs/tags/{}", tag);
        let output = self
            .capture([
                "ls-remote",
                "--tags",
                self.remote.as_str(),
                reference.as_str(),
            ])
            .map_err(|e| ReleaseError::probe(e.to_string()))?;

        if !output.success() {
            return Err(ReleaseError::probe(output.describe_failure()));
        }

        Ok(ls_remote_lists_tag(&output.stdout, tag))
    }

    pub fn stage_all(&self) -> Result<()> {
        self.mutate("stage changes", ["add", "."])
    }

    /// `git diff --cached --quiet` exits 0 only when nothing is staged.
    pub fn has_staged_changes(&self) -> Result<bool> {
        let output = self.capture(["diff", "--cached", "--quiet"])?;
        Ok(!output.success())
    }

    /// Commit staged changes, bypassing commit hooks.
    pub fn commit(&self, message: &str) -> Result<()> {
        self.mutate("commit", ["commit", "-m", message, "--no-verify"])
    }

    pub fn delete_local_tag(&self, tag: &str) -> Result<()> {
        self.mutate("delete local tag", ["tag", "-d", tag])
    }

    pub fn delete_remote_tag(&self, tag: &str) -> Result<()> {
        let reference = format!("refs/tags/{}", tag);
        self.mutate(
            "delete remote tag",
            [
                "push",
                "--delete",
                self.remote.as_str(),
                reference.as_str(),
            ],
        )
    }

    pub fn create_annotated_tag(&self, tag: &str, message: &str) -> Result<()> {
        self.mutate("create tag", ["tag", "-a", tag, "-m", message])
    }

    pub fn push_tag(&self, tag: &str) -> Result<()> {
        let reference = format!("refs/tags/{}", tag);
        self.mutate(
            "push tag",
            ["push", self.remote.as_str(), reference.as_str()],
        )
    }
}

/// Whether `ls-remote` output names exactly `refs/tags/<tag>` (or its
/// peeled `^{}` line). Each line is `<oid>\t<refname>`.
pub fn ls_remote_lists_tag(stdout: &str, tag: &str) -> bool {
    let wanted = format!("refs/tags/{}", tag);
    let peeled = format!("{}^{{}}", wanted);

    stdout
        .lines()
        .filter_map(|line| line.split_whitespace().nth(1))
        .any(|name| name == wanted || name == peeled)
}
