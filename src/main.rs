//! srcpkg - source-build package reconciler
//!
//! Ensures every listed `<namespace>/<name>` package is registered in the local
//! package database, cloning and building with makepkg the ones that are not.
//! Safe to run repeatedly: installed packages are skipped.

use clap::Parser;

mod builder;
mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod package;
mod process;
mod progress;
mod query;
mod reconcile;
mod temp;
#[cfg(test)]
mod test_fixtures;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("Warning: failed to initialize logging: {e}");
    }

    let result = match cli.command {
        Commands::Sync(args) => commands::sync::run(cli.config, args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
