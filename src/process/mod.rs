//! External process abstraction layer
//!
//! Every collaborator this crate drives (`git`, the content-export CLI) is
//! reached through the [CommandRunner] trait, so the tag reconciler and the
//! content refresher can be exercised against a scripted runner instead of
//! real binaries.
//!
//! - [system::SystemRunner]: spawns real processes with `std::process`
//! - [mock::MockRunner]: records invocations and replays scripted results
//!
//! ```rust
//! # use release_kit::process::{CommandLine, CommandRunner, OutputMode};
//! # fn example<R: CommandRunner>(runner: &R) -> release_kit::Result<()> {
//! let status = CommandLine::new("git").arg("status");
//! let output = runner.run(&status, OutputMode::Capture)?;
//! println!("inside a repository: {}", output.success());
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod system;

pub use mock::MockRunner;
pub use system::SystemRunner;

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// A program plus its arguments, optionally pinned to a working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: String,
    pub args: Vec<String>,
    pub current_dir: Option<PathBuf>,
}

impl CommandLine {
    pub fn new(program: impl Into<String>) -> Self {
        CommandLine {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.current_dir = Some(dir.as_ref().to_path_buf());
        self
    }
}

/// Program and arguments joined by spaces; the working directory is omitted.
impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// How a child's standard streams are wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Child shares the operator's terminal; nothing is captured.
    Inherit,
    /// stdout and stderr are captured into [CommandOutput].
    Capture,
}

/// Exit status and (when captured) output of a finished child process.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    /// `None` when the process was terminated by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn ok() -> Self {
        CommandOutput {
            code: Some(0),
            ..Default::default()
        }
    }

    pub fn ok_with_stdout(stdout: impl Into<String>) -> Self {
        CommandOutput {
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        CommandOutput {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Short human-readable reason for a failure, for error messages.
    pub fn describe_failure(&self) -> String {
        let status = match self.code {
            Some(code) => format!("exit code {}", code),
            None => "terminated by signal".to_string(),
        };
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            status
        } else {
            format!("{}: {}", status, stderr)
        }
    }
}

/// Narrow capability for running an external command to completion.
///
/// Implementations block until the child exits. An `Err` means the process
/// could not be started at all; a started process that exits non-zero is an
/// `Ok` whose [CommandOutput::success] is false.
pub trait CommandRunner: Send + Sync {
    fn run(&self, command: &CommandLine, mode: OutputMode) -> Result<CommandOutput>;
}
