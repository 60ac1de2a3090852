//! Command implementations for srcpkg CLI

pub mod completions;
pub mod sync;
pub mod version;
