//! Base directory for temporary build directories.
//!
//! `std::env::temp_dir()` follows `TMPDIR`, which may be relative (`TMPDIR=tmp`).
//! Build directories must never land under the current working directory, so a
//! relative value is replaced with the platform default.

use std::env;
use std::path::PathBuf;

/// Absolute directory to create temporary build directories in
pub fn temp_dir_base() -> PathBuf {
    let base = env::temp_dir();
    if base.is_absolute() {
        base
    } else {
        PathBuf::from("/tmp")
    }
}
