//! Command assembler — every piece of the runtime command line in one place.

use std::path::Path;

use crate::args::context::LaunchContext;
use crate::args::identity::MainClause;

const INSTALL_ROOT_PROPERTY: &str = "-Dcom.sun.aas.installRoot=";
const SECURITY_POLICY_PROPERTY: &str = "-Djava.security.policy=";
const LOGIN_CONFIG_PROPERTY: &str = "-Djava.security.auth.login.config=";
const AGENT_OPTION: &str = "-javaagent:";

/// One rendered command-line element.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    /// Emitted as-is (already quoted where needed).
    Verbatim(String),
    /// Double-quoted when it contains whitespace.
    Value(String),
}

impl Part {
    fn render(&self) -> String {
        match self {
            Part::Verbatim(s) => s.clone(),
            Part::Value(s) => quote(s),
        }
    }
}

/// Builder for the runtime options that precede the main clause.
#[derive(Debug, Clone, Default)]
pub struct CommandAssembler {
    parts: Vec<Part>,
}

impl CommandAssembler {
    /// Start with an empty option list.
    pub fn new() -> Self {
        Self { parts: Vec::new() }
    }

    /// Built-in system properties derived from the installation.
    pub fn with_system_options(mut self, ctx: &LaunchContext) -> Self {
        self.parts.push(Part::Value(property(
            INSTALL_ROOT_PROPERTY,
            &ctx.install_root,
        )));
        self.parts.push(Part::Value(property(
            SECURITY_POLICY_PROPERTY,
            &ctx.security_policy(),
        )));
        self.parts.push(Part::Value(format!(
            "{}file:{}",
            LOGIN_CONFIG_PROPERTY,
            ctx.login_config().display()
        )));
        self
    }

    /// Options routed to the runtime stream, in order.
    pub fn with_runtime_args(mut self, args: &[String]) -> Self {
        self.parts
            .extend(args.iter().cloned().map(Part::Value));
        self
    }

    /// The merged search path; entries are already quoted individually.
    pub fn with_search_path(mut self, merged: String) -> Self {
        self.parts.push(Part::Verbatim("-classpath".into()));
        self.parts.push(Part::Verbatim(merged));
        self
    }

    /// Render each option.
    pub fn build(self) -> Vec<String> {
        self.parts.iter().map(Part::render).collect()
    }
}

fn property(prefix: &str, path: &Path) -> String {
    format!("{}{}", prefix, path.display())
}

/// Hand-off marker: the bootstrap archive as a runtime agent, carrying the
/// hand-off string as its options.
pub fn handoff_marker(bootstrap_archive: &str, handoff: &str) -> String {
    quote(&format!("{}{}={}", AGENT_OPTION, bootstrap_archive, handoff))
}

/// Rendered main clause.
pub fn render_main_clause(clause: Option<MainClause>) -> Vec<String> {
    clause
        .map(MainClause::into_args)
        .unwrap_or_default()
        .iter()
        .map(|a| quote(a))
        .collect()
}

/// Double-quote `s` when it contains whitespace and is not already quoted.
pub fn quote(s: &str) -> String {
    let already = s.len() >= 2 && s.starts_with('"') && s.ends_with('"');
    if s.is_empty() {
        "\"\"".to_string()
    } else if !already && s.chars().any(char::is_whitespace) {
        format!("\"{}\"", s)
    } else {
        s.to_string()
    }
}

/// Render an application argument: always double-quoted and, outside
/// Windows, with `\`, `"`, `$` and `` ` `` backslash-escaped so the calling
/// shell passes it through unchanged.
pub fn escape_argument(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        if !cfg!(windows) && matches!(c, '\\' | '"' | '$' | '`') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

/// Join pre-rendered pieces with single spaces, skipping empty ones.
pub fn join_rendered<'a>(pieces: impl IntoIterator<Item = &'a str>) -> String {
    pieces
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
