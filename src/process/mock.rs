use std::collections::HashMap;
use std::io;
use std::sync::Mutex;

use crate::error::{ReleaseError, Result};
use crate::process::{CommandLine, CommandOutput, CommandRunner, OutputMode};

type Effect = Box<dyn Fn(&CommandLine) + Send + Sync>;

enum Scripted {
    Output(CommandOutput),
    SpawnFailure(String),
}

/// A single recorded invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub command: CommandLine,
    pub mode: OutputMode,
}

/// Mock runner for testing without spawning processes.
///
/// Commands are matched by their [Display](std::fmt::Display) form
/// (`"git tag -d 1.0.0"`). Unscripted commands succeed with empty output.
pub struct MockRunner {
    scripted: HashMap<String, Scripted>,
    effects: HashMap<String, Effect>,
    calls: Mutex<Vec<Invocation>>,
}

impl MockRunner {
    pub fn new() -> Self {
        MockRunner {
            scripted: HashMap::new(),
            effects: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Script the result returned for `command`.
    pub fn respond(&mut self, command: &str, output: CommandOutput) -> &mut Self {
        self.scripted
            .insert(command.to_string(), Scripted::Output(output));
        self
    }

    /// Script `command` to exit with a non-zero `code`.
    pub fn fail(&mut self, command: &str, code: i32) -> &mut Self {
        self.respond(command, CommandOutput::failed(code, ""))
    }

    /// Script `command` to be impossible to start.
    pub fn fail_to_spawn(&mut self, command: &str) -> &mut Self {
        self.scripted.insert(
            command.to_string(),
            Scripted::SpawnFailure(format!("failed to start '{}'", command)),
        );
        self
    }

    /// Run `effect` whenever `command` is invoked, before its result is returned.
    pub fn on_run<F>(&mut self, command: &str, effect: F) -> &mut Self
    where
        F: Fn(&CommandLine) + Send + Sync + 'static,
    {
        self.effects.insert(command.to_string(), Box::new(effect));
        self
    }

    /// All invocations so far, in order.
    pub fn invocations(&self) -> Vec<Invocation> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    /// Display forms of all invocations so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.invocations()
            .iter()
            .map(|i| i.command.to_string())
            .collect()
    }

    pub fn was_called(&self, command: &str) -> bool {
        self.calls().iter().any(|c| c == command)
    }

    /// Position of the first invocation of `command`, if any.
    pub fn position(&self, command: &str) -> Option<usize> {
        self.calls().iter().position(|c| c == command)
    }
}

impl Default for MockRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, command: &CommandLine, mode: OutputMode) -> Result<CommandOutput> {
        let key = command.to_string();

        if let Ok(mut calls) = self.calls.lock() {
            calls.push(Invocation {
                command: command.clone(),
                mode,
            });
        }

        if let Some(effect) = self.effects.get(&key) {
            effect(command);
        }

        match self.scripted.get(&key) {
            Some(Scripted::Output(output)) => Ok(output.clone()),
            Some(Scripted::SpawnFailure(msg)) => Err(ReleaseError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                msg.clone(),
            ))),
            None => Ok(CommandOutput::ok()),
        }
    }
}
