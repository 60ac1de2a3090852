//! Sync command implementation
//!
//! Loads the config, picks the package list and failure policy, runs the
//! reconciler in check or apply mode, and prints one result.

use std::path::{Path, PathBuf};

use console::{Style, Term};
use serde_json::json;

use crate::cli::SyncArgs;
use crate::config::Config;
use crate::error::{Result, SrcpkgError};
use crate::process::{CommandRunner, SystemRunner};
use crate::progress::ProgressDisplay;
use crate::reconcile::{BatchResult, Reconciler};

/// Run sync command
pub fn run(config_path: Option<PathBuf>, args: SyncArgs) -> Result<()> {
    let show_progress = !args.json && !args.check && Term::stderr().is_term();

    match execute(config_path.as_deref(), &args, &SystemRunner, show_progress) {
        Ok(result) => {
            if args.json {
                println!("{}", serde_json::to_string(&result)?);
            } else {
                println!("{}", render_result(&result));
            }
            Ok(())
        }
        Err(e) => {
            if args.json {
                println!("{}", failure_json(&e));
            }
            Err(e)
        }
    }
}

/// Reconcile the requested packages with `runner`
pub fn execute<R: CommandRunner>(
    config_path: Option<&Path>,
    args: &SyncArgs,
    runner: &R,
    show_progress: bool,
) -> Result<BatchResult> {
    let config = Config::load(config_path)?;

    let packages = if args.packages.is_empty() {
        config.packages.clone()
    } else {
        args.packages.clone()
    };
    if packages.is_empty() {
        return Err(SrcpkgError::EmptyBatch);
    }

    let policy = args.on_failure.unwrap_or(config.on_failure);
    let reconciler = Reconciler::new(runner, &config.tools, policy);

    if args.check {
        return reconciler.plan(&packages);
    }

    if !show_progress {
        return reconciler.reconcile(&packages);
    }

    let progress = ProgressDisplay::new(packages.len() as u64);
    let result = reconciler.with_reporter(&progress).reconcile(&packages);
    match &result {
        Ok(_) => progress.finish(),
        Err(_) => progress.abandon(),
    }
    result
}

/// One-line human summary
pub fn render_result(result: &BatchResult) -> String {
    let (label, style) = if result.changed {
        ("changed", Style::new().yellow().bold())
    } else {
        ("ok", Style::new().green().bold())
    };

    match result.rc {
        Some(rc) => format!("{}: {} (rc={rc})", style.apply_to(label), result.msg),
        None => format!("{}: {}", style.apply_to(label), result.msg),
    }
}

/// JSON shape of a fatal error, with the failing command's status and stderr when known
pub fn failure_json(err: &SrcpkgError) -> serde_json::Value {
    let mut value = json!({
        "failed": true,
        "msg": err.to_string(),
    });
    if let Some(outcome) = err.outcome() {
        value["rc"] = json!(outcome.code);
        value["stdout"] = json!(outcome.stdout);
        value["stderr"] = json!(outcome.stderr);
    }
    value
}
