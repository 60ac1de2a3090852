use clap::Parser;

use crate::config::FailurePolicy;

/// Arguments for the sync command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Build and install missing packages:\n    srcpkg sync user/pkg-one user/pkg-two\n\n\
                   Show what would be installed:\n    srcpkg sync user/pkg-one --check\n\n\
                   Use the package list from the config file:\n    srcpkg sync\n\n\
                   Keep going after a failed build:\n    srcpkg sync user/a user/b --on-failure continue\n\n\
                   Machine-readable result:\n    srcpkg sync user/pkg-one --json")]
pub struct SyncArgs {
    /// Package identifiers (<namespace>/<name>). If not provided, reads `packages` from the config file
    pub packages: Vec<String>,

    /// Report what would be installed without building anything
    #[arg(long, visible_alias = "dry-run")]
    pub check: bool,

    /// What to do when a clone or build fails (halt, continue). Overrides the config file
    #[arg(long, value_name = "POLICY")]
    pub on_failure: Option<FailurePolicy>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}
