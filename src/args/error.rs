//! Errors raised while building a launch plan.

use std::path::PathBuf;

use thiserror::Error;

use crate::args::tokenizer::TokenizeError;

/// Errors that abort plan construction. None of them are retried.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// The raw argument string could not be split.
    #[error("Malformed arguments: {0}")]
    Tokenize(#[from] TokenizeError),

    /// A valued option was the last token.
    #[error("Missing value for option {option}")]
    MissingValue { option: String },

    /// The path probe failed for a specific path.
    #[error("Failed to probe '{path}': {source}")]
    Probe {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Pre-set VM options contained something that is not an option.
    #[error("VM argument '{arg}' not recognized")]
    UnrecognizedVmArg { arg: String },

    /// No installation root in the launch context.
    #[error("Installation root is not set (AS_INSTALL)")]
    MissingInstallRoot,
}

impl LaunchError {
    pub(crate) fn probe(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LaunchError::Probe {
            path: path.into(),
            source,
        }
    }
}
