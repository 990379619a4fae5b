//! Launch context — the environment bundle the router works against.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::args::error::LaunchError;
use crate::args::probe::PathProbe;
use crate::config::LauncherConfig;

/// Installation root.
pub const ENV_INSTALL_ROOT: &str = "AS_INSTALL";
/// Pre-set runtime options.
pub const ENV_VM_ARGS: &str = "VMARGS";
/// Extra framework class path entries.
pub const ENV_APPCPATH: &str = "APPCPATH";
/// Executable search path.
pub const ENV_SEARCH_PATH: &str = "PATH";
/// Interpreter chosen by the calling script.
pub const ENV_INTERPRETER: &str = "JAVA";

const CONFIG_DIR: &str = "domains/domain1/config";
const CONFIG_XML: &str = "glassfish-acc.xml";
const LEGACY_CONFIG_XML: &str = "sun-acc.xml";

/// Everything the router needs from outside the argument string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchContext {
    pub install_root: PathBuf,
    /// Runtime options set ahead of the command line.
    pub vm_args: Option<String>,
    /// Framework class path additions, passed through the hand-off.
    pub appcpath: Option<String>,
    /// Separator used when joining search-path entries.
    pub path_separator: char,
    /// Executable search path probed for a runtime installation.
    pub search_path: Option<String>,
    /// Interpreter binary; falls back to the configured default.
    pub interpreter: Option<String>,
}

impl LaunchContext {
    /// Context with only an install root and the platform separator.
    pub fn new(install_root: impl Into<PathBuf>) -> Self {
        Self {
            install_root: install_root.into(),
            vm_args: None,
            appcpath: None,
            path_separator: platform_path_separator(),
            search_path: None,
            interpreter: None,
        }
    }

    /// Build from a variable map. `AS_INSTALL` is required; empty values
    /// count as unset.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, LaunchError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut vars: HashMap<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(_, v)| !v.is_empty())
            .collect();

        let install_root = vars
            .remove(ENV_INSTALL_ROOT)
            .ok_or(LaunchError::MissingInstallRoot)?;

        Ok(Self {
            install_root: normalize(Path::new(&install_root)),
            vm_args: vars.remove(ENV_VM_ARGS),
            appcpath: vars.remove(ENV_APPCPATH),
            path_separator: platform_path_separator(),
            search_path: vars.remove(ENV_SEARCH_PATH),
            interpreter: vars.remove(ENV_INTERPRETER),
        })
    }

    /// Build from the current process environment.
    pub fn from_env() -> Result<Self, LaunchError> {
        Self::from_vars(std::env::vars())
    }

    pub fn with_vm_args(mut self, vm_args: impl Into<String>) -> Self {
        self.vm_args = Some(vm_args.into());
        self
    }

    pub fn with_appcpath(mut self, appcpath: impl Into<String>) -> Self {
        self.appcpath = Some(appcpath.into());
        self
    }

    pub fn with_path_separator(mut self, separator: char) -> Self {
        self.path_separator = separator;
        self
    }

    pub fn with_search_path(mut self, search_path: impl Into<String>) -> Self {
        self.search_path = Some(search_path.into());
        self
    }

    pub fn with_interpreter(mut self, interpreter: impl Into<String>) -> Self {
        self.interpreter = Some(interpreter.into());
        self
    }

    /// Interpreter to put first on the command line.
    pub fn interpreter<'a>(&'a self, config: &'a LauncherConfig) -> &'a str {
        self.interpreter.as_deref().unwrap_or(config.interpreter.as_str())
    }

    /// Absolute path of the framework bootstrap archive.
    pub fn bootstrap_archive(&self, config: &LauncherConfig) -> PathBuf {
        self.install_root.join(&config.bootstrap_archive)
    }

    pub fn security_policy(&self) -> PathBuf {
        self.install_root.join("lib/appclient/client.policy")
    }

    pub fn login_config(&self) -> PathBuf {
        self.install_root.join("lib/appclient/appclientlogin.conf")
    }

    /// Client container configuration file.
    ///
    /// Prefers `glassfish-acc.xml`, then the legacy `sun-acc.xml`; when
    /// neither exists the primary name is returned so later errors name it.
    pub fn default_config_xml(&self, probe: &impl PathProbe) -> Result<PathBuf, LaunchError> {
        let dir = self.install_root.join(CONFIG_DIR);
        let primary = dir.join(CONFIG_XML);
        if probe
            .exists(&primary)
            .map_err(|e| LaunchError::probe(&primary, e))?
        {
            return Ok(primary);
        }

        let legacy = dir.join(LEGACY_CONFIG_XML);
        if probe
            .exists(&legacy)
            .map_err(|e| LaunchError::probe(&legacy, e))?
        {
            return Ok(legacy);
        }

        Ok(primary)
    }
}

fn platform_path_separator() -> char {
    if cfg!(windows) {
        ';'
    } else {
        ':'
    }
}

/// Lexically drop `.` components and trailing separators.
fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, std::path::Component::CurDir))
        .collect()
}
