//! Identity resolution — what the invocation ultimately launches.

use std::path::Path;

use serde::Serialize;

use crate::args::error::LaunchError;
use crate::args::handoff::encode_arg;
use crate::args::probe::PathProbe;
use crate::config::LauncherConfig;

/// The resolved launch target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Identity {
    /// A packaged client laid out as a directory, as an absolute path.
    Directory(String),
    /// A packaged client archive. Metadata-only archives are launched via
    /// the framework bootstrap archive.
    Archive { path: String, runnable: bool },
    /// A compiled class file given by path.
    ClassFile(String),
    /// A fully qualified class name, run directly.
    ClassName(String),
}

/// How the runtime is told what to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MainClause {
    /// `-jar <archive>`.
    Jar(String),
    /// A class name as the main argument.
    Class(String),
}

impl MainClause {
    pub fn into_args(self) -> Vec<String> {
        match self {
            MainClause::Jar(archive) => vec!["-jar".to_string(), archive],
            MainClause::Class(name) => vec![name],
        }
    }
}

impl Identity {
    /// Fragment recorded in the hand-off string. The value is encoded like
    /// an `arg=` value so delimiters inside paths survive.
    pub fn handoff_clause(&self) -> String {
        let (kind, value) = match self {
            Identity::Directory(path) => ("dir", path),
            Identity::Archive { path, .. } => ("jar", path),
            Identity::ClassFile(path) => ("classfile", path),
            Identity::ClassName(name) => ("class", name),
        };
        format!("client={}={}", kind, encode_arg(value))
    }

    /// Main-invocation clause for the runtime command line.
    pub fn main_clause(&self, bootstrap_archive: &str) -> MainClause {
        match self {
            Identity::Archive {
                path,
                runnable: true,
            } => MainClause::Jar(path.clone()),
            Identity::Directory(_) | Identity::Archive { .. } | Identity::ClassFile(_) => {
                MainClause::Jar(bootstrap_archive.to_string())
            }
            Identity::ClassName(name) => MainClause::Class(name.clone()),
        }
    }
}

/// Where identity negotiation stands.
///
/// `Tentative` can be replaced by a later client-identity option; `Final`
/// never changes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum IdentityState {
    #[default]
    Unset,
    Tentative(Identity),
    Final(Identity),
}

impl IdentityState {
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            IdentityState::Unset => None,
            IdentityState::Tentative(id) | IdentityState::Final(id) => Some(id),
        }
    }

    pub fn is_set(&self) -> bool {
        !matches!(self, IdentityState::Unset)
    }

    pub fn is_final(&self) -> bool {
        matches!(self, IdentityState::Final(_))
    }

    /// True once `-jar` has named the archive to run. Only `-jar` finalizes
    /// an archive identity; every later token belongs to the application.
    pub fn is_jar_setting(&self) -> bool {
        matches!(self, IdentityState::Final(Identity::Archive { .. }))
    }

    pub fn into_identity(self) -> Option<Identity> {
        match self {
            IdentityState::Unset => None,
            IdentityState::Tentative(id) | IdentityState::Final(id) => Some(id),
        }
    }
}

/// Resolve the value of the client-identity option.
pub fn resolve_client_option(
    value: &str,
    probe: &impl PathProbe,
    config: &LauncherConfig,
) -> Result<Identity, LaunchError> {
    let is_dir = probe
        .is_directory(Path::new(value))
        .map_err(|e| LaunchError::probe(value, e))?;

    if is_dir {
        let absolute = std::path::absolute(value).map_err(|e| LaunchError::probe(value, e))?;
        return Ok(Identity::Directory(absolute.display().to_string()));
    }

    Ok(Identity::Archive {
        path: value.to_string(),
        runnable: !config.is_secondary_archive(value),
    })
}

/// Resolve the value of the runtime jar option. The archive is always run
/// as given.
pub fn resolve_jar_option(value: &str) -> Identity {
    Identity::Archive {
        path: value.to_string(),
        runnable: true,
    }
}

/// Resolve a bare token seen while no identity is set.
pub fn resolve_bare(token: &str, config: &LauncherConfig) -> Identity {
    if config.is_class_file(token) {
        Identity::ClassFile(token.to_string())
    } else {
        Identity::ClassName(token.to_string())
    }
}
