//! Error types and handling for srcpkg
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Errors are grouped by domain:
//! - package identifiers
//! - external commands (query, clone, build)
//! - configuration
//! - file system

use miette::Diagnostic;
use thiserror::Error;

use crate::process::CommandOutput;

/// Main error type for srcpkg operations
#[derive(Error, Diagnostic, Debug)]
pub enum SrcpkgError {
    // Package errors
    #[error("invalid name {identifier}")]
    #[diagnostic(
        code(srcpkg::package::invalid_identifier),
        help("Package identifiers must have the form <namespace>/<name>, e.g. user/repo")
    )]
    InvalidIdentifier { identifier: String },

    #[error("No packages to reconcile")]
    #[diagnostic(
        code(srcpkg::package::empty_batch),
        help("Pass package identifiers on the command line or list them under `packages:` in the config file")
    )]
    EmptyBatch,

    // Command errors
    #[error("`{command}` exited with status {}: {}", .outcome.code, .outcome.stderr.trim())]
    #[diagnostic(code(srcpkg::command::failed))]
    CommandFailed {
        command: String,
        outcome: CommandOutput,
    },

    #[error("Failed to run `{command}`: {reason}")]
    #[diagnostic(
        code(srcpkg::command::spawn_failed),
        help("Check that the tool is installed and on PATH, or adjust the command in the config file")
    )]
    CommandSpawnFailed { command: String, reason: String },

    #[error("Failed to create temporary build directory: {reason}")]
    #[diagnostic(code(srcpkg::fs::temp_dir_failed))]
    TempDirFailed { reason: String },

    // Configuration errors
    #[error("Configuration file not found: {path}")]
    #[diagnostic(code(srcpkg::config::not_found))]
    ConfigNotFound { path: String },

    #[error("Failed to read configuration file: {path}")]
    #[diagnostic(code(srcpkg::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(srcpkg::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(srcpkg::config::invalid))]
    ConfigInvalid { message: String },

    // File system errors
    #[error("IO error: {message}")]
    #[diagnostic(code(srcpkg::fs::io_error))]
    IoError { message: String },
}

impl SrcpkgError {
    /// Captured outcome of the external command that caused this error, if any
    pub fn outcome(&self) -> Option<&CommandOutput> {
        match self {
            SrcpkgError::CommandFailed { outcome, .. } => Some(outcome),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SrcpkgError {
    fn from(err: std::io::Error) -> Self {
        SrcpkgError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for SrcpkgError {
    fn from(err: serde_yaml::Error) -> Self {
        SrcpkgError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for SrcpkgError {
    fn from(err: serde_json::Error) -> Self {
        SrcpkgError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, SrcpkgError>;
