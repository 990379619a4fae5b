//! Shared test utilities: an in-memory path probe and context helpers.

#![allow(dead_code, unused_imports)]

use acclaunch::args::{LaunchContext, PathProbe};
use acclaunch::config::LauncherConfig;
use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

pub const INSTALL: &str = "/opt/gf";
pub const BOOTSTRAP: &str = "/opt/gf/lib/gf-client.jar";
pub const CONFIG_XML: &str = "/opt/gf/domains/domain1/config/glassfish-acc.xml";

/// Probe answering from fixed sets of directories and files.
#[derive(Debug, Default, Clone)]
pub struct FakeProbe {
    dirs: HashSet<PathBuf>,
    files: HashSet<PathBuf>,
    failing: HashSet<PathBuf>,
}

impl FakeProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dir(mut self, path: &str) -> Self {
        self.dirs.insert(PathBuf::from(path));
        self
    }

    pub fn with_file(mut self, path: &str) -> Self {
        self.files.insert(PathBuf::from(path));
        self
    }

    /// Any question about `path` fails with a permission error.
    pub fn with_failure(mut self, path: &str) -> Self {
        self.failing.insert(PathBuf::from(path));
        self
    }

    fn check(&self, path: &Path) -> io::Result<()> {
        if self.failing.contains(path) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        }
        Ok(())
    }
}

impl PathProbe for FakeProbe {
    fn is_directory(&self, path: &Path) -> io::Result<bool> {
        self.check(path)?;
        Ok(self.dirs.contains(path))
    }

    fn exists(&self, path: &Path) -> io::Result<bool> {
        self.check(path)?;
        Ok(self.dirs.contains(path) || self.files.contains(path))
    }
}

/// Context rooted at [`INSTALL`] with `:` as the separator.
pub fn context() -> LaunchContext {
    LaunchContext::new(INSTALL).with_path_separator(':')
}

pub fn config() -> LauncherConfig {
    LauncherConfig::default()
}

pub fn strings(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}
