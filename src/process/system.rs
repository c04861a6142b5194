use std::process::{Command, Stdio};

use crate::error::{ReleaseError, Result};
use crate::process::{CommandLine, CommandOutput, CommandRunner, OutputMode};

/// Runs commands as real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        SystemRunner
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, command: &CommandLine, mode: OutputMode) -> Result<CommandOutput> {
        log::debug!("running: {}", command);

        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args);
        if let Some(dir) = &command.current_dir {
            cmd.current_dir(dir);
        }

        let spawn_error = |e: std::io::Error| {
            ReleaseError::Io(std::io::Error::new(
                e.kind(),
                format!("failed to start '{}': {}", command.program, e),
            ))
        };

        let output = match mode {
            OutputMode::Inherit => {
                let status = cmd
                    .stdin(Stdio::inherit())
                    .stdout(Stdio::inherit())
                    .stderr(Stdio::inherit())
                    .status()
                    .map_err(spawn_error)?;
                CommandOutput {
                    code: status.code(),
                    stdout: String::new(),
                    stderr: String::new(),
                }
            }
            OutputMode::Capture => {
                let output = cmd.stdin(Stdio::null()).output().map_err(spawn_error)?;
                CommandOutput {
                    code: output.status.code(),
                    stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                }
            }
        };

        log::debug!("'{}' finished with {:?}", command, output.code);
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program_is_io_error() {
        let runner = SystemRunner::new();
        let cmd = CommandLine::new("definitely-not-a-real-binary-7f3a");
        let err = runner.run(&cmd, OutputMode::Capture).unwrap_err();
        assert!(matches!(err, ReleaseError::Io(_)));
        assert!(err.to_string().contains("failed to start"));
    }

    #[cfg(unix)]
    #[test]
    fn test_captures_stdout_and_exit_code() {
        let runner = SystemRunner::new();
        let ok = runner
            .run(
                &CommandLine::new("sh").args(["-c", "echo hello"]),
                OutputMode::Capture,
            )
            .unwrap();
        assert!(ok.success());
        assert_eq!(ok.stdout.trim(), "hello");

        let failed = runner
            .run(
                &CommandLine::new("sh").args(["-c", "echo oops >&2; exit 3"]),
                OutputMode::Capture,
            )
            .unwrap();
        assert_eq!(failed.code, Some(3));
        assert_eq!(failed.stderr.trim(), "oops");
    }

    #[cfg(unix)]
    #[test]
    fn test_respects_current_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        let runner = SystemRunner::new();
        let out = runner
            .run(
                &CommandLine::new("pwd").current_dir(dir.path()),
                OutputMode::Capture,
            )
            .unwrap();
        let reported = std::fs::canonicalize(out.stdout.trim()).unwrap();
        assert_eq!(reported, std::fs::canonicalize(dir.path()).unwrap());
    }
}
