//! Progress hooks for apply mode

use crate::package::PackageId;

/// What happened to one package in apply mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageStatus {
    /// Cloned and built successfully
    Installed,
    /// Already registered in the package database
    AlreadyInstalled,
    /// Clone or build exited with this status code
    Failed(i32),
}

/// Receives per-package progress from the reconciler
pub trait Reporter {
    fn package_started(&self, _index: usize, _total: usize, _package: &PackageId) {}

    fn package_finished(&self, _package: &PackageId, _status: PackageStatus) {}
}

/// Reporter that ignores everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl Reporter for NoopReporter {}
