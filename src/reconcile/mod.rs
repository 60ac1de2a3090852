//! Reconciliation of a declared package list against the package database
//!
//! Two entry points over the same batch:
//! - [`Reconciler::plan`] (dry run) counts the packages that would be built
//!   and never touches the system.
//! - [`Reconciler::reconcile`] (apply) validates each identifier, skips
//!   installed packages and builds the rest, strictly in input order.
//!
//! The first malformed identifier halts an apply batch with
//! [`SrcpkgError::InvalidIdentifier`]; packages after it are never looked at.
//! Clone/build failures follow the configured [`FailurePolicy`].

use serde::Serialize;
use tracing::{info, warn};

use crate::builder::PackageBuilder;
use crate::config::{FailurePolicy, ToolCommands};
use crate::error::{Result, SrcpkgError};
use crate::package::{PackageId, short_name_lossy};
use crate::process::CommandRunner;
use crate::query::InstalledStateChecker;

pub mod reporter;

pub use reporter::{NoopReporter, PackageStatus, Reporter};

/// Message when at least one package was built
pub const INSTALLED_MSG: &str = "installed package(s)";

/// Message when nothing needed building
pub const UNCHANGED_MSG: &str = "package(s) already installed";

/// Summary of one reconciliation call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchResult {
    /// Whether any package was (or in a dry run, would be) built
    pub changed: bool,

    /// Human-readable summary
    pub msg: String,

    /// Exit status of the most recent build; absent when nothing was built
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rc: Option<i32>,
}

/// Drives the installed-state check and the builder across a batch
pub struct Reconciler<'a, R: CommandRunner> {
    checker: InstalledStateChecker<'a, R>,
    builder: PackageBuilder<'a, R>,
    policy: FailurePolicy,
    reporter: &'a dyn Reporter,
}

impl<'a, R: CommandRunner> Reconciler<'a, R> {
    pub fn new(runner: &'a R, tools: &'a ToolCommands, policy: FailurePolicy) -> Self {
        Self {
            checker: InstalledStateChecker::new(runner, tools),
            builder: PackageBuilder::new(runner, tools),
            policy,
            reporter: &NoopReporter,
        }
    }

    /// Send per-package progress to `reporter`
    #[must_use]
    pub fn with_reporter(mut self, reporter: &'a dyn Reporter) -> Self {
        self.reporter = reporter;
        self
    }

    /// Dry run: report how many packages are not installed.
    ///
    /// Identifiers are not validated here; the short name is taken leniently.
    pub fn plan(&self, packages: &[String]) -> Result<BatchResult> {
        if packages.is_empty() {
            return Err(SrcpkgError::EmptyBatch);
        }

        let mut missing = 0usize;
        for package in packages {
            let short_name = short_name_lossy(package);
            if self.checker.is_installed(short_name)? {
                info!(package = %package, "already installed");
            } else {
                info!(package = %package, "would be installed");
                missing += 1;
            }
        }

        Ok(if missing > 0 {
            BatchResult {
                changed: true,
                msg: format!("{missing} package(s) would be installed"),
                rc: None,
            }
        } else {
            BatchResult {
                changed: false,
                msg: UNCHANGED_MSG.to_string(),
                rc: None,
            }
        })
    }

    /// Apply: build every package that is not installed yet.
    pub fn reconcile(&self, packages: &[String]) -> Result<BatchResult> {
        if packages.is_empty() {
            return Err(SrcpkgError::EmptyBatch);
        }

        let total = packages.len();
        let mut changed = false;
        let mut rc = None;

        for (index, identifier) in packages.iter().enumerate() {
            let package = PackageId::parse(identifier)?;
            self.reporter.package_started(index, total, &package);

            if self.checker.is_installed(package.short_name())? {
                info!(package = %package, "already installed");
                self.reporter
                    .package_finished(&package, PackageStatus::AlreadyInstalled);
                continue;
            }

            changed = true;
            match self.builder.build_and_install(&package) {
                Ok(outcome) => {
                    info!(package = %package, "installed");
                    rc = Some(outcome.code);
                    self.reporter
                        .package_finished(&package, PackageStatus::Installed);
                }
                Err(SrcpkgError::CommandFailed { command, outcome }) => {
                    self.reporter
                        .package_finished(&package, PackageStatus::Failed(outcome.code));
                    if self.policy == FailurePolicy::Halt {
                        return Err(SrcpkgError::CommandFailed { command, outcome });
                    }
                    warn!(
                        package = %package,
                        command = %command,
                        code = outcome.code,
                        stderr = %outcome.stderr.trim(),
                        "build failed, continuing"
                    );
                    rc = Some(outcome.code);
                }
                Err(other) => return Err(other),
            }
        }

        let msg = if changed { INSTALLED_MSG } else { UNCHANGED_MSG };
        Ok(BatchResult {
            changed,
            msg: msg.to_string(),
            rc,
        })
    }
}
