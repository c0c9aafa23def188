//! Implementation of the `glossa check` command.

use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use glossa::TranslationTable;
use miette::Report;
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::output::TranslationDiagnostic;

/// Arguments for the check command.
#[derive(Debug, clap::Args)]
pub struct CheckArgs {
    /// Files to check (.json)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for one checked file.
#[derive(Debug, Serialize)]
struct FileReport {
    file: PathBuf,
    keys: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Run the check command.
pub fn run_check(args: CheckArgs) -> miette::Result<i32> {
    let mut reports = Vec::with_capacity(args.files.len());
    let mut failures = 0;

    for path in &args.files {
        let report = check_file(path, !args.json);
        if report.error.is_some() {
            failures += 1;
        }
        reports.push(report);
    }

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&reports).expect("JSON serialization should not fail")
        );
    } else {
        let ok = reports.len() - failures;
        println!(
            "{} file(s) ok, {} with errors",
            ok.green(),
            if failures > 0 {
                failures.red().to_string()
            } else {
                failures.to_string()
            }
        );
    }

    if failures > 0 {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}

/// Load one file into a scratch table, rendering a diagnostic on failure when
/// `render` is set.
fn check_file(path: &Path, render: bool) -> FileReport {
    let content = match read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            let error = format!("cannot read {}: {}", path.display(), e);
            if render {
                eprintln!("{} {}", "error:".red().bold(), error);
            }
            return FileReport {
                file: path.to_path_buf(),
                keys: 0,
                error: Some(error),
            };
        }
    };

    let locale = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("file");
    let mut table = TranslationTable::new();
    match table.load_str(locale, &content) {
        Ok(keys) => FileReport {
            file: path.to_path_buf(),
            keys,
            error: None,
        },
        Err(e) => {
            if render {
                let diagnostic = TranslationDiagnostic::from_load_error(path, &content, &e);
                eprintln!("{:?}", Report::new(diagnostic));
            }
            FileReport {
                file: path.to_path_buf(),
                keys: 0,
                error: Some(e.to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn valid_file_reports_key_count() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("en.json");
        fs::write(&path, r#"{ "a": "A", "nested": { "b": "B" } }"#).unwrap();

        let report = check_file(&path, false);
        assert_eq!(report.keys, 2);
        assert!(report.error.is_none());
    }

    #[test]
    fn invalid_file_reports_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("en.json");
        fs::write(&path, r#"{ "a": 1 }"#).unwrap();

        let report = check_file(&path, false);
        assert!(report.error.unwrap().contains("'a'"));
    }

    #[test]
    fn missing_file_reports_error() {
        let report = check_file(Path::new("/nonexistent/en.json"), false);
        assert!(report.error.is_some());
    }
}
