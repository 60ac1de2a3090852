//! Configuration (config.yaml) data structures and loading
//!
//! The config file names the external tools srcpkg drives, the remote URL
//! template used to clone packages, the build-failure policy and, optionally,
//! the package list to reconcile when none is given on the command line.
//!
//! Every field is optional; missing fields fall back to the stock
//! pacman/git/makepkg setup:
//!
//! ```yaml
//! tools:
//!   query: [pacman, -Q]
//!   clone: [git, clone]
//!   build: [makepkg, --syncdeps, --install, --noconfirm, --needed]
//!   locale: [env, LC_ALL=C]
//!   remote_url: "git@github.com:{package}.git"
//! on_failure: halt
//! packages:
//!   - user/repo
//! ```

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SrcpkgError};


/// Config directory name under the platform config location
pub const CONFIG_DIR: &str = "srcpkg";

/// Config file name
pub const CONFIG_FILE: &str = "config.yaml";

/// Placeholder substituted with the package identifier in `remote_url`
pub const PACKAGE_PLACEHOLDER: &str = "{package}";

fn argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(ToString::to_string).collect()
}

/// Command templates for the external tools
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolCommands {
    /// Package query command; the short name is appended
    pub query: Vec<String>,

    /// Clone command; the remote URL and target directory are appended
    pub clone: Vec<String>,

    /// Build-and-install command, run inside the cloned tree
    pub build: Vec<String>,

    /// Prefix forcing a parse-stable locale on the build command
    pub locale: Vec<String>,

    /// Remote URL template containing `{package}`
    pub remote_url: String,
}

impl Default for ToolCommands {
    fn default() -> Self {
        Self {
            query: argv(&["pacman", "-Q"]),
            clone: argv(&["git", "clone"]),
            build: argv(&["makepkg", "--syncdeps", "--install", "--noconfirm", "--needed"]),
            locale: argv(&["env", "LC_ALL=C"]),
            remote_url: format!("git@github.com:{PACKAGE_PLACEHOLDER}.git"),
        }
    }
}

impl ToolCommands {
    /// `<query> <short_name>`
    pub fn query_argv(&self, short_name: &str) -> Vec<String> {
        let mut argv = self.query.clone();
        argv.push(short_name.to_string());
        argv
    }

    /// Remote URL for a package identifier
    pub fn remote_url(&self, identifier: &str) -> String {
        self.remote_url.replace(PACKAGE_PLACEHOLDER, identifier)
    }

    /// `<clone> <remote_url> <target>`
    pub fn clone_argv(&self, identifier: &str, target: &Path) -> Vec<String> {
        let mut argv = self.clone.clone();
        argv.push(self.remote_url(identifier));
        argv.push(target.to_string_lossy().into_owned());
        argv
    }

    /// `<locale> <build>`
    pub fn build_argv(&self) -> Vec<String> {
        self.locale.iter().chain(&self.build).cloned().collect()
    }

    /// Reject templates that cannot produce a runnable command
    pub fn validate(&self) -> Result<()> {
        for (field, argv) in [
            ("query", &self.query),
            ("clone", &self.clone),
            ("build", &self.build),
        ] {
            if argv.is_empty() || argv[0].trim().is_empty() {
                return Err(SrcpkgError::ConfigInvalid {
                    message: format!("tools.{field} must name a program"),
                });
            }
        }

        if !self.remote_url.contains(PACKAGE_PLACEHOLDER) {
            return Err(SrcpkgError::ConfigInvalid {
                message: format!(
                    "tools.remote_url must contain {PACKAGE_PLACEHOLDER}, got '{}'",
                    self.remote_url
                ),
            });
        }

        Ok(())
    }
}

/// What to do when cloning or building a package fails in apply mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Stop the batch at the first failure and report it as fatal
    #[default]
    Halt,
    /// Record the failure's status code and move on to the next package
    Continue,
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "halt" => Ok(FailurePolicy::Halt),
            "continue" => Ok(FailurePolicy::Continue),
            other => Err(format!("unknown failure policy '{other}' (expected halt or continue)")),
        }
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailurePolicy::Halt => f.write_str("halt"),
            FailurePolicy::Continue => f.write_str("continue"),
        }
    }
}

/// Top-level configuration file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// External tool commands
    pub tools: ToolCommands,

    /// Build-failure policy for apply mode
    pub on_failure: FailurePolicy,

    /// Packages to reconcile when none are given on the command line
    pub packages: Vec<String>,
}

impl Config {
    /// Parse configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)?;
        config.tools.validate()?;
        Ok(config)
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SrcpkgError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = fs::read_to_string(path).map_err(|e| SrcpkgError::ConfigReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        Self::from_yaml(&content).map_err(|e| match e {
            SrcpkgError::ConfigParseFailed { reason, .. } => SrcpkgError::ConfigParseFailed {
                path: path.display().to_string(),
                reason,
            },
            other => other,
        })
    }

    /// Resolve and load the effective configuration.
    ///
    /// An explicit path (from `--config` or `SRCPKG_CONFIG`) must exist. Without
    /// one, the user config file is used when present, otherwise defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            debug!(path = %path.display(), "loading config");
            return Self::from_file(path);
        }

        match default_config_path() {
            Some(path) if path.exists() => {
                debug!(path = %path.display(), "loading user config");
                Self::from_file(&path)
            }
            _ => Ok(Self::default()),
        }
    }
}

/// `<config dir>/srcpkg/config.yaml`, if the platform has a config directory
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
}
