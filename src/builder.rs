//! Build-and-install of one package from source
//!
//! Each build gets its own temporary directory:
//! 1. clone the package's repository into it
//! 2. run the build tool with the directory as its working directory
//!
//! The directory is removed when the [`TempDir`] guard drops, on success,
//! on tool failure and on any early return. The calling process's own
//! working directory is never changed; the build tool gets the temporary
//! directory through the runner instead.

use tempfile::TempDir;
use tracing::{debug, info};

use crate::config::ToolCommands;
use crate::error::{Result, SrcpkgError};
use crate::package::PackageId;
use crate::process::{CommandOutput, CommandRunner};

/// Clones and builds packages with the configured tools
pub struct PackageBuilder<'a, R: CommandRunner> {
    runner: &'a R,
    tools: &'a ToolCommands,
}

impl<'a, R: CommandRunner> PackageBuilder<'a, R> {
    pub fn new(runner: &'a R, tools: &'a ToolCommands) -> Self {
        Self { runner, tools }
    }

    /// Clone and build `package`, returning the build tool's outcome.
    ///
    /// Both steps are checked: a failing clone comes back as
    /// [`SrcpkgError::CommandFailed`] carrying the clone outcome and the
    /// build step never runs; a failing build carries the build outcome.
    pub fn build_and_install(&self, package: &PackageId) -> Result<CommandOutput> {
        let workdir = TempDir::with_prefix_in("srcpkg-", crate::temp::temp_dir_base())
            .map_err(|e| SrcpkgError::TempDirFailed {
                reason: e.to_string(),
            })?;
        debug!(package = %package, dir = %workdir.path().display(), "created build directory");

        info!(package = %package, url = %self.tools.remote_url(package.as_str()), "cloning");
        self.runner.run(
            &self.tools.clone_argv(package.as_str(), workdir.path()),
            None,
            true,
        )?;

        info!(package = %package, "building");
        let outcome = self
            .runner
            .run(&self.tools.build_argv(), Some(workdir.path()), true)?;

        debug!(package = %package, code = outcome.code, "build finished");
        Ok(outcome)
    }
}
