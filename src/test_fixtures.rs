//! Test fixtures and utilities for reducing test setup duplication.
//!
//! - [`create_temp_dir`] for a temp directory that never lands under the
//!   current working directory.
//! - [`FakeRunner`], a scripted [`CommandRunner`] that plays the package
//!   database, the clone tool and the build tool, and records every call.
//!
//! # Usage
//!
//! ```ignore
//! let runner = FakeRunner::new()
//!     .with_installed(["bar"])
//!     .with_clone_outcome("user/repo", 1, "stdout", "stderr");
//! // ... exercise code taking &impl CommandRunner ...
//! assert_eq!(runner.calls().len(), 2);
//! ```

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::Result;
use crate::package::short_name_lossy;
use crate::process::{CommandOutput, CommandRunner, check_outcome};

/// Create a temp directory in the system temp location.
///
/// # Panics
///
/// Panics if the temp directory cannot be created.
#[must_use]
pub fn create_temp_dir() -> TempDir {
    TempDir::new_in(crate::temp::temp_dir_base()).expect("Failed to create temp directory")
}

fn outcome(code: i32, stdout: &str, stderr: &str) -> CommandOutput {
    CommandOutput {
        code,
        stdout: stdout.to_string(),
        stderr: stderr.to_string(),
    }
}

/// One recorded invocation
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub argv: Vec<String>,
    pub cwd: Option<PathBuf>,
}

/// Scripted stand-in for pacman, git and makepkg.
///
/// - a query call (anything that is neither clone nor build) exits 0 iff the
///   last argument is in the installed set, unless a fixed query outcome is set
/// - a clone call (`... clone <url> <dir>`) remembers which package is being
///   built and returns the scripted clone outcome for it (default: success)
/// - a build call (containing `makepkg`) returns the scripted build outcome
///   for the current package (default: success) and, on success, marks the
///   package installed
#[derive(Debug, Default)]
pub struct FakeRunner {
    installed: RefCell<HashSet<String>>,
    query_outcome: Option<CommandOutput>,
    clone_outcomes: HashMap<String, CommandOutput>,
    build_outcomes: HashMap<String, CommandOutput>,
    current: RefCell<Option<String>>,
    calls: RefCell<Vec<RecordedCall>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_installed<const N: usize>(self, names: [&str; N]) -> Self {
        self.installed
            .borrow_mut()
            .extend(names.iter().map(ToString::to_string));
        self
    }

    pub fn with_query_outcome(mut self, code: i32, stdout: &str, stderr: &str) -> Self {
        self.query_outcome = Some(outcome(code, stdout, stderr));
        self
    }

    pub fn with_clone_outcome(
        mut self,
        identifier: &str,
        code: i32,
        stdout: &str,
        stderr: &str,
    ) -> Self {
        self.clone_outcomes
            .insert(identifier.to_string(), outcome(code, stdout, stderr));
        self
    }

    pub fn with_build_outcome(
        mut self,
        identifier: &str,
        code: i32,
        stdout: &str,
        stderr: &str,
    ) -> Self {
        self.build_outcomes
            .insert(identifier.to_string(), outcome(code, stdout, stderr));
        self
    }

    /// Argument vectors of every call, in order
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.borrow().iter().map(|c| c.argv.clone()).collect()
    }

    /// Every call with its working directory
    pub fn recorded(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }

    /// Number of build invocations
    pub fn build_count(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| is_build(&c.argv))
            .count()
    }

    /// Number of clone invocations
    pub fn clone_count(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| is_clone(&c.argv))
            .count()
    }

    pub fn is_installed(&self, short_name: &str) -> bool {
        self.installed.borrow().contains(short_name)
    }

    fn respond(&self, argv: &[String]) -> CommandOutput {
        if is_clone(argv) {
            let identifier = identifier_from_url(&argv[argv.len() - 2]);
            let result = self
                .clone_outcomes
                .get(&identifier)
                .cloned()
                .unwrap_or_else(|| outcome(0, "", ""));
            *self.current.borrow_mut() = Some(identifier);
            return result;
        }

        if is_build(argv) {
            let current = self.current.borrow().clone().unwrap_or_default();
            let result = self
                .build_outcomes
                .get(&current)
                .cloned()
                .unwrap_or_else(|| outcome(0, "", ""));
            if result.success() {
                self.installed
                    .borrow_mut()
                    .insert(short_name_lossy(&current).to_string());
            }
            return result;
        }

        if let Some(fixed) = &self.query_outcome {
            return fixed.clone();
        }
        let name = argv.last().map(String::as_str).unwrap_or_default();
        if self.is_installed(name) {
            outcome(0, &format!("{name} 1.0-1\n"), "")
        } else {
            outcome(1, "", &format!("error: package '{name}' was not found\n"))
        }
    }
}

impl CommandRunner for FakeRunner {
    fn run(&self, argv: &[String], cwd: Option<&Path>, check: bool) -> Result<CommandOutput> {
        self.calls.borrow_mut().push(RecordedCall {
            argv: argv.to_vec(),
            cwd: cwd.map(Path::to_path_buf),
        });
        let result = self.respond(argv);
        check_outcome(argv, result, check)
    }
}

fn is_clone(argv: &[String]) -> bool {
    argv.len() >= 4 && argv.iter().any(|a| a == "clone")
}

fn is_build(argv: &[String]) -> bool {
    argv.iter().any(|a| a == "makepkg")
}

/// `git@github.com:user/repo.git` -> `user/repo`
fn identifier_from_url(url: &str) -> String {
    let path = url.split_once(':').map_or(url, |(_, path)| path);
    path.trim_end_matches(".git").to_string()
}
