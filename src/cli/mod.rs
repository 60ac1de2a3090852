//! CLI definitions using clap derive API
//!
//! One submodule per command's argument type:
//! - sync: Sync command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod completions;
pub mod sync;

pub use completions::CompletionsArgs;
pub use sync::SyncArgs;

/// srcpkg - build missing packages from source
#[derive(Parser, Debug)]
#[command(
    name = "srcpkg",
    author,
    version,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Build and install missing makepkg packages from source",
    long_about = "srcpkg reconciles a list of <namespace>/<name> package identifiers against the \
                  local package database, cloning and building with makepkg every package that \
                  is not installed yet. Running it again is a no-op.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  srcpkg sync user/pkg              \x1b[90m# Build user/pkg unless installed\x1b[0m\n   \
                  srcpkg sync user/pkg --check      \x1b[90m# Only report what would change\x1b[0m\n   \
                  srcpkg sync --config hosts/a.yaml \x1b[90m# Packages and tools from a config file\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Config file (defaults to <config dir>/srcpkg/config.yaml when present)
    #[arg(long, short = 'c', global = true, env = "SRCPKG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build and install every listed package that is not installed
    Sync(SyncArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
