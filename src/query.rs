//! Installed-state lookup against the local package database

use tracing::debug;

use crate::config::ToolCommands;
use crate::error::Result;
use crate::process::CommandRunner;

/// Asks the package query tool whether a package is installed
pub struct InstalledStateChecker<'a, R: CommandRunner> {
    runner: &'a R,
    tools: &'a ToolCommands,
}

impl<'a, R: CommandRunner> InstalledStateChecker<'a, R> {
    pub fn new(runner: &'a R, tools: &'a ToolCommands) -> Self {
        Self { runner, tools }
    }

    /// True iff `<query> <short_name>` exits with status zero.
    ///
    /// Any non-zero exit means "not installed". Only a tool that cannot be
    /// started at all is an error.
    pub fn is_installed(&self, short_name: &str) -> Result<bool> {
        let outcome = self
            .runner
            .run(&self.tools.query_argv(short_name), None, false)?;
        let installed = outcome.code == 0;
        debug!(package = short_name, installed, "queried package database");
        Ok(installed)
    }
}
