//! Option registry — every recognized spelling and where it routes.

use std::collections::HashMap;

/// Which table an option belongs to, and therefore where it is routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    /// Runtime option that consumes the next token as its value.
    RuntimeValued,
    /// Framework option that consumes the next token as its value.
    FrameworkValued,
    /// Framework option with no value.
    FrameworkFlag,
}

/// Options that get special treatment while routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionRole {
    /// The multi-entry search path (`-classpath` / `-cp`), merged at render time.
    ClassPath,
    /// `-jar <archive>`: sets the identity and closes identity negotiation.
    Jar,
    /// `-client <path>`: the client-identity option.
    Client,
    /// `-usage`: the invocation does not need a target.
    Usage,
    /// `-help`: the invocation does not need a target.
    Help,
    /// No special handling.
    Plain,
}

/// A single option definition.
#[derive(Debug, Clone, Copy)]
pub struct OptionDef {
    /// Exact spelling, including the leading dash.
    pub spelling: &'static str,
    pub kind: OptionKind,
    pub role: OptionRole,
    /// Human-readable description (for logs).
    pub description: &'static str,
}

impl OptionDef {
    const fn new(
        spelling: &'static str,
        kind: OptionKind,
        role: OptionRole,
        description: &'static str,
    ) -> Self {
        Self {
            spelling,
            kind,
            role,
            description,
        }
    }

    /// True for `-usage` and `-help`.
    pub fn clears_identity_requirement(&self) -> bool {
        matches!(self.role, OptionRole::Usage | OptionRole::Help)
    }
}

use OptionKind::{FrameworkFlag, FrameworkValued, RuntimeValued};
use OptionRole::{ClassPath, Client, Help, Jar, Plain, Usage};

static OPTIONS: &[OptionDef] = &[
    // === Runtime options with a value ===
    OptionDef::new("-classpath", RuntimeValued, ClassPath, "Runtime class search path"),
    OptionDef::new("-cp", RuntimeValued, ClassPath, "Runtime class search path"),
    OptionDef::new("-jar", RuntimeValued, Jar, "Client archive to launch"),
    // === Framework options with a value ===
    OptionDef::new("-client", FrameworkValued, Client, "Client archive or directory"),
    OptionDef::new("-mainclass", FrameworkValued, Plain, "Main class within the client"),
    OptionDef::new("-name", FrameworkValued, Plain, "Display name of the client"),
    OptionDef::new("-xml", FrameworkValued, Plain, "Client container descriptor"),
    OptionDef::new("-configxml", FrameworkValued, Plain, "Client container configuration"),
    OptionDef::new("-user", FrameworkValued, Plain, "Login user name"),
    OptionDef::new("-password", FrameworkValued, Plain, "Login password"),
    OptionDef::new("-passwordfile", FrameworkValued, Plain, "File holding the login password"),
    OptionDef::new("-targetserver", FrameworkValued, Plain, "host[:port][,host[:port]...]"),
    // === Framework flags ===
    OptionDef::new("-textauth", FrameworkFlag, Plain, "Text-based authentication"),
    OptionDef::new("-noappinvoke", FrameworkFlag, Plain, "Prepare the client without running it"),
    OptionDef::new("-usage", FrameworkFlag, Usage, "Print usage"),
    OptionDef::new("-help", FrameworkFlag, Help, "Print help"),
];

/// The complete, ordered list of recognized options.
pub fn option_registry() -> &'static [OptionDef] {
    OPTIONS
}

/// Spelling → definition lookup built from the registry.
#[derive(Debug, Clone)]
pub struct OptionTable {
    by_spelling: HashMap<&'static str, &'static OptionDef>,
}

impl OptionTable {
    /// The full table used for command-line arguments.
    pub fn standard() -> Self {
        Self::from_defs(OPTIONS.iter())
    }

    /// Only the runtime options; used for pre-set VM options.
    pub fn runtime_only() -> Self {
        Self::from_defs(OPTIONS.iter().filter(|d| d.kind == RuntimeValued && d.role == ClassPath))
    }

    fn from_defs(defs: impl Iterator<Item = &'static OptionDef>) -> Self {
        Self {
            by_spelling: defs.map(|d| (d.spelling, d)).collect(),
        }
    }

    /// Exact-match lookup. No prefix or glob matching.
    pub fn lookup(&self, token: &str) -> Option<&'static OptionDef> {
        self.by_spelling.get(token).copied()
    }

    pub fn len(&self) -> usize {
        self.by_spelling.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_spelling.is_empty()
    }
}

impl Default for OptionTable {
    fn default() -> Self {
        Self::standard()
    }
}
