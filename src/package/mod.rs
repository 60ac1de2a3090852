//! Package identifiers
//!
//! A package identifier has the form `<namespace>/<name>` and addresses the
//! source repository to build. The trailing `<name>` segment is the short
//! name the package is registered under in the local package database.

use std::fmt;

use crate::error::{Result, SrcpkgError};

/// A validated `<namespace>/<name>` package identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageId {
    identifier: String,
    split: usize,
}

impl PackageId {
    /// Parse an identifier, rejecting strings without a `/` or with an empty
    /// trailing name.
    pub fn parse(identifier: &str) -> Result<Self> {
        match identifier.rfind('/') {
            Some(split) if split + 1 < identifier.len() => Ok(Self {
                identifier: identifier.to_string(),
                split,
            }),
            _ => Err(SrcpkgError::InvalidIdentifier {
                identifier: identifier.to_string(),
            }),
        }
    }

    /// The full identifier as given
    pub fn as_str(&self) -> &str {
        &self.identifier
    }

    /// The name the package is installed under
    pub fn short_name(&self) -> &str {
        &self.identifier[self.split + 1..]
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.identifier)
    }
}

/// Short name without validation: the segment after the last `/`, or the
/// whole string when there is none. Used by the dry-run path only.
pub fn short_name_lossy(identifier: &str) -> &str {
    identifier
        .rsplit_once('/')
        .map_or(identifier, |(_, name)| name)
}
