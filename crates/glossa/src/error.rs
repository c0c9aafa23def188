//! Error types for translation loading.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that occur while loading translation tables.
///
/// Resolution itself never fails; only reading generator output can.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File I/O error when reading a translation file or directory.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file is not valid JSON.
    #[error("{path}:{line}:{column}: {source}")]
    Json {
        path: PathBuf,
        line: usize,
        column: usize,
        #[source]
        source: serde_json::Error,
    },

    /// The top level of a translation file (or a locale entry of a whole
    /// table) is not a JSON object.
    #[error("{path}: expected a JSON object of translations, found {found}")]
    NotAnObject { path: PathBuf, found: &'static str },

    /// A translation value is neither a string nor a nested object.
    #[error("{path}: value of '{key}' must be a string, found {found}")]
    InvalidValue {
        path: PathBuf,
        key: String,
        found: &'static str,
    },

    /// Attempted to reload a locale that was never loaded from a file.
    #[error("cannot reload '{locale}': no translation files were loaded for it")]
    NoPathForReload { locale: String },
}

impl LoadError {
    pub(crate) fn json(path: PathBuf, source: serde_json::Error) -> Self {
        LoadError::Json {
            path,
            line: source.line(),
            column: source.column(),
            source,
        }
    }
}
