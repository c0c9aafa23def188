//! Miette diagnostic wrapper for translation file errors.
//!
//! Note: This module has an exception for `unused_assignments` because miette
//! derive macros read struct fields in generated code that rustc cannot track.
#![allow(unused_assignments)]

use std::path::Path;

use glossa::LoadError;
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// A miette-compatible diagnostic for a translation file that failed to load.
///
/// Note: Fields are read by miette derive macros, not directly by code.
#[derive(Debug, Error, Diagnostic)]
#[error("invalid translation file: {message}")]
#[diagnostic(code(glossa::translations))]
pub struct TranslationDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: SourceSpan,

    message: String,

    #[help]
    help: Option<String>,
}

impl TranslationDiagnostic {
    /// Create a diagnostic from a LoadError with source context.
    pub fn from_load_error(path: &Path, content: &str, err: &LoadError) -> Self {
        let (line, column, message, help) = match err {
            LoadError::Json {
                line,
                column,
                source,
                ..
            } => (*line, *column, source.to_string(), None),
            LoadError::NotAnObject { found, .. } => (
                1,
                1,
                format!("top level is {found}"),
                Some("translation files are JSON objects of key to string".to_string()),
            ),
            LoadError::InvalidValue { key, found, .. } => {
                let (line, column) = locate_key(content, key);
                (
                    line,
                    column,
                    format!("'{key}' is {found}"),
                    Some("translation values must be strings or nested objects".to_string()),
                )
            }
            other => (1, 1, other.to_string(), None),
        };

        // Convert line:column to byte offset.
        // Sum of (line_length + 1) for lines before error line, plus column.
        let offset = content
            .lines()
            .take(line.saturating_sub(1))
            .map(|l| l.len() + 1)
            .sum::<usize>()
            + column.saturating_sub(1);

        // Clamp offset to content length to avoid miette panic on out-of-bounds
        let offset = offset.min(content.len());

        TranslationDiagnostic {
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            span: (offset, 1).into(),
            message,
            help,
        }
    }
}

/// Best-effort 1-based position of the last segment of a flattened key.
fn locate_key(content: &str, key: &str) -> (usize, usize) {
    let last = key.rsplit('.').next().unwrap_or(key);
    let needle = format!("\"{last}\"");
    content
        .lines()
        .enumerate()
        .find_map(|(index, line)| line.find(&needle).map(|col| (index + 1, col + 1)))
        .unwrap_or((1, 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locate_key_finds_leaf_segment() {
        let content = "{\n  \"auth\": {\n    \"count\": 3\n  }\n}";
        assert_eq!(locate_key(content, "auth.count"), (3, 5));
    }

    #[test]
    fn locate_key_defaults_to_start() {
        assert_eq!(locate_key("{}", "missing"), (1, 1));
    }
}
