//! External process invocation
//!
//! Every external tool (package query, clone, build) goes through a
//! [`CommandRunner`]. The fail-fast contract lives here: a `check = true`
//! invocation that exits non-zero comes back as
//! [`SrcpkgError::CommandFailed`] carrying the captured output, so call sites
//! never inspect exit codes themselves.

use std::path::Path;
use std::process::Command;

use serde::Serialize;
use tracing::debug;

use crate::error::{Result, SrcpkgError};

/// Captured result of one external process invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandOutput {
    /// Exit status code (`-1` when the process was terminated by a signal)
    pub code: i32,
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == 0
    }
}

/// Runs external commands and captures their output
pub trait CommandRunner {
    /// Run `argv` to completion, optionally inside `cwd`.
    ///
    /// With `check` set, a non-zero exit is returned as
    /// [`SrcpkgError::CommandFailed`]. Without it, the outcome is returned
    /// whatever the exit code.
    fn run(&self, argv: &[String], cwd: Option<&Path>, check: bool) -> Result<CommandOutput>;
}

/// Render an argv for log lines and error messages
pub fn display_command(argv: &[String]) -> String {
    argv.join(" ")
}

/// Escalate a non-zero exit when the caller asked for a checked invocation
pub fn check_outcome(argv: &[String], outcome: CommandOutput, check: bool) -> Result<CommandOutput> {
    if check && !outcome.success() {
        return Err(SrcpkgError::CommandFailed {
            command: display_command(argv),
            outcome,
        });
    }
    Ok(outcome)
}

/// [`CommandRunner`] backed by [`std::process::Command`]
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, argv: &[String], cwd: Option<&Path>, check: bool) -> Result<CommandOutput> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| SrcpkgError::CommandSpawnFailed {
                command: String::new(),
                reason: "empty command".to_string(),
            })?;

        let mut command = Command::new(program);
        command.args(args);
        if let Some(dir) = cwd {
            command.current_dir(dir);
        }

        debug!(command = %display_command(argv), cwd = ?cwd, "running");

        let output = command
            .output()
            .map_err(|e| SrcpkgError::CommandSpawnFailed {
                command: display_command(argv),
                reason: e.to_string(),
            })?;

        let outcome = CommandOutput {
            code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        debug!(command = %display_command(argv), code = outcome.code, "finished");

        check_outcome(argv, outcome, check)
    }
}
