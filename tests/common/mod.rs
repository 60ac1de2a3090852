//! Common test utilities for srcpkg integration tests
//!
//! [`TestSystem`] stands up a throwaway package database plus fake `pacman`,
//! `git` and `makepkg` scripts, and a config file pointing srcpkg at them.
//! The fakes behave like the real tools as far as srcpkg can tell:
//! - `pacman -Q <name>` exits 0 iff `<db>/<name>` exists
//! - `git clone <url> <dir>` writes the URL to `<dir>/SOURCE`, or fails when
//!   the URL is listed in `fail-clone`
//! - `makepkg ...` reads `SOURCE` from its working directory and registers
//!   the package in the database, or fails when the name is listed in
//!   `fail-build`
//!
//! Every invocation is appended to `calls.log`.

#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// A fake package system for integration tests
pub struct TestSystem {
    /// Temporary directory
    pub temp: TempDir,
    /// Fake package database: one empty file per installed package
    pub db: PathBuf,
    /// Directory holding the fake tools
    pub bin: PathBuf,
    /// Config file pointing at the fake tools
    pub config: PathBuf,
}

impl TestSystem {
    /// Create a new test system with an empty package database
    pub fn new() -> Self {
        Self::with_config_extra("")
    }

    /// Create a test system, appending `extra` YAML to the generated config
    pub fn with_config_extra(extra: &str) -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().to_path_buf();
        let db = root.join("db");
        let bin = root.join("bin");
        fs::create_dir_all(&db).expect("Failed to create db directory");
        fs::create_dir_all(&bin).expect("Failed to create bin directory");

        let state = root.display().to_string();
        write_script(
            &bin.join("pacman"),
            &format!(
                "echo \"pacman $*\" >> '{state}/calls.log'\n\
                 [ -f '{state}/db/'\"$2\" ]\n"
            ),
        );
        write_script(
            &bin.join("git"),
            &format!(
                "echo \"git $*\" >> '{state}/calls.log'\n\
                 if [ -f '{state}/fail-clone' ] && grep -qxF \"$2\" '{state}/fail-clone'; then\n\
                 \x20 echo \"fatal: could not read from remote repository\" >&2\n\
                 \x20 exit 128\n\
                 fi\n\
                 echo \"$2\" > \"$3/SOURCE\"\n"
            ),
        );
        write_script(
            &bin.join("makepkg"),
            &format!(
                "name=$(basename \"$(cat SOURCE)\" .git)\n\
                 echo \"makepkg $* name=$name LC_ALL=$LC_ALL\" >> '{state}/calls.log'\n\
                 if [ -f '{state}/fail-build' ] && grep -qxF \"$name\" '{state}/fail-build'; then\n\
                 \x20 echo \"==> ERROR: A failure occurred in build().\" >&2\n\
                 \x20 exit 4\n\
                 fi\n\
                 touch '{state}/db/'\"$name\"\n\
                 echo \"==> Finished making: $name\"\n"
            ),
        );

        let config = root.join("config.yaml");
        let yaml = format!(
            "tools:\n\
             \x20 query: ['{bin}/pacman', '-Q']\n\
             \x20 clone: ['{bin}/git', 'clone']\n\
             \x20 build: ['{bin}/makepkg', '--syncdeps', '--install', '--noconfirm', '--needed']\n\
             {extra}",
            bin = bin.display(),
        );
        fs::write(&config, yaml).expect("Failed to write config");

        Self {
            temp,
            db,
            bin,
            config,
        }
    }

    /// Root of the test system
    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    /// Mark a package as installed
    pub fn install(&self, name: &str) {
        fs::write(self.db.join(name), "").expect("Failed to register package");
    }

    /// Whether a package is registered
    pub fn is_installed(&self, name: &str) -> bool {
        self.db.join(name).exists()
    }

    /// Make `git clone` fail for a remote URL
    pub fn fail_clone(&self, url: &str) {
        append_line(&self.root().join("fail-clone"), url);
    }

    /// Make `makepkg` fail for a package name
    pub fn fail_build(&self, name: &str) {
        append_line(&self.root().join("fail-build"), name);
    }

    /// Lines of the invocation log
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(self.root().join("calls.log"))
            .map(|log| log.lines().map(ToString::to_string).collect())
            .unwrap_or_default()
    }

    /// Invocations of one tool
    pub fn calls_to(&self, tool: &str) -> Vec<String> {
        let prefix = format!("{tool} ");
        self.calls()
            .into_iter()
            .filter(|line| line.starts_with(&prefix))
            .collect()
    }

    /// srcpkg command wired to this system's config
    pub fn srcpkg(&self) -> Command {
        let mut cmd = srcpkg_cmd();
        cmd.arg("--config").arg(&self.config);
        cmd
    }
}

/// srcpkg command with a clean environment
// Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
#[allow(deprecated)]
pub fn srcpkg_cmd() -> Command {
    let mut cmd = Command::cargo_bin("srcpkg").expect("Failed to find srcpkg binary");
    cmd.env_remove("SRCPKG_CONFIG");
    cmd.env_remove("RUST_LOG");
    cmd
}

fn write_script(path: &Path, body: &str) {
    fs::write(path, format!("#!/bin/sh\n{body}")).expect("Failed to write script");
    let mut perms = fs::metadata(path)
        .expect("Failed to stat script")
        .permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms).expect("Failed to chmod script");
}

fn append_line(path: &Path, line: &str) {
    let mut content = fs::read_to_string(path).unwrap_or_default();
    content.push_str(line);
    content.push('\n');
    fs::write(path, content).expect("Failed to write file");
}
