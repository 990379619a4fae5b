use serde::{Deserialize, Serialize};

/// Launcher configuration: installation layout and naming conventions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LauncherConfig {
    /// Interpreter used when the environment does not name one (default: "java").
    #[serde(default = "default_interpreter")]
    pub interpreter: String,
    /// Binary looked for on the executable search path when probing for a
    /// runtime installation (default: "java").
    #[serde(default = "default_launcher_binary")]
    pub launcher_binary: String,
    /// Framework bootstrap archive, relative to the install root.
    #[serde(default = "default_bootstrap_archive")]
    pub bootstrap_archive: String,
    /// Suffix identifying a class file given as a bare token.
    #[serde(default = "default_class_file_suffix")]
    pub class_file_suffix: String,
    /// Archives that only carry client metadata and cannot be run directly.
    #[serde(default = "default_secondary_archive_suffixes")]
    pub secondary_archive_suffixes: Vec<String>,
    /// Sibling layouts tried, in order, next to the probed launcher binary's
    /// directory's parent.
    #[serde(default = "default_runtime_layouts")]
    pub runtime_layouts: Vec<String>,
    /// Mode keyword that opens the hand-off string.
    #[serde(default = "default_handoff_mode")]
    pub handoff_mode: String,
}

fn default_interpreter() -> String {
    "java".to_string()
}

fn default_launcher_binary() -> String {
    "java".to_string()
}

fn default_bootstrap_archive() -> String {
    "lib/gf-client.jar".to_string()
}

fn default_class_file_suffix() -> String {
    ".class".to_string()
}

fn default_secondary_archive_suffixes() -> Vec<String> {
    vec![".ear".to_string()]
}

fn default_runtime_layouts() -> Vec<String> {
    vec!["jre/lib/ext".to_string(), "lib/ext".to_string()]
}

fn default_handoff_mode() -> String {
    "acscript".to_string()
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            interpreter: default_interpreter(),
            launcher_binary: default_launcher_binary(),
            bootstrap_archive: default_bootstrap_archive(),
            class_file_suffix: default_class_file_suffix(),
            secondary_archive_suffixes: default_secondary_archive_suffixes(),
            runtime_layouts: default_runtime_layouts(),
            handoff_mode: default_handoff_mode(),
        }
    }
}

impl LauncherConfig {
    /// Whether `path` names an archive that only describes a client.
    pub fn is_secondary_archive(&self, path: &str) -> bool {
        self.secondary_archive_suffixes
            .iter()
            .any(|suffix| path.ends_with(suffix.as_str()))
    }

    pub fn is_class_file(&self, token: &str) -> bool {
        token.ends_with(self.class_file_suffix.as_str())
    }
}
