//! Coverage command implementation.

use std::path::PathBuf;

use clap::Args;
use glossa::{Messages, TranslationTable};
use miette::{miette, IntoDiagnostic, Result};
use serde::Serialize;

use super::load_table;
use crate::output::table::{format_coverage_table, LocaleCoverage};

/// Arguments for the coverage command.
#[derive(Debug, Args)]
pub struct CoverageArgs {
    /// Directory containing translation JSON files.
    #[arg(long, env = "GLOSSA_LANG_DIR", default_value = "lang")]
    pub dir: PathBuf,

    /// Source locale whose keys every other locale should define.
    #[arg(long, default_value = "en")]
    pub source: String,

    /// Locales to check (comma-separated). Defaults to every loaded locale
    /// other than the source.
    #[arg(long, value_delimiter = ',')]
    pub lang: Vec<String>,

    /// Exit with non-zero code if any locale is incomplete.
    #[arg(long)]
    pub strict: bool,

    /// Output results as JSON.
    #[arg(long)]
    pub json: bool,
}

/// JSON output format for coverage data.
#[derive(Debug, Serialize)]
struct CoverageJson<'a> {
    locale: &'a str,
    translated: usize,
    total: usize,
    missing: &'a [String],
    extra: &'a [String],
}

/// Run the coverage command.
pub fn run_coverage(args: CoverageArgs) -> Result<i32> {
    let table = load_table(&args.dir)?;

    let source = table
        .locale(&args.source)
        .ok_or_else(|| miette!("Source locale '{}' has no translation files", args.source))?;
    let source_count = source.len();

    let targets: Vec<String> = if args.lang.is_empty() {
        table
            .locales()
            .into_iter()
            .filter(|code| *code != args.source)
            .map(str::to_string)
            .collect()
    } else {
        args.lang.clone()
    };

    let coverage_data: Vec<LocaleCoverage> = targets
        .iter()
        .map(|locale| compute_coverage(&table, source, locale))
        .collect();

    // Check if any locale is incomplete
    let any_incomplete = coverage_data.iter().any(|c| !c.missing.is_empty());

    // Output results
    if args.json {
        let json_data: Vec<CoverageJson<'_>> = coverage_data
            .iter()
            .map(|c| CoverageJson {
                locale: &c.locale,
                translated: c.translated,
                total: source_count,
                missing: &c.missing,
                extra: &c.extra,
            })
            .collect();

        let json_output = serde_json::to_string_pretty(&json_data).into_diagnostic()?;
        println!("{}", json_output);
    } else {
        // Print ASCII table
        let table = format_coverage_table(source_count, &coverage_data);
        println!("{}", table);

        // Print missing keys per locale
        for locale_coverage in &coverage_data {
            if !locale_coverage.missing.is_empty() {
                println!("\nMissing in {}:", locale_coverage.locale);
                for key in &locale_coverage.missing {
                    println!("  - {}", key);
                }
            }
        }
    }

    // Determine exit code
    if args.strict && any_incomplete {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}

/// Compare one locale against the source messages. A locale without files
/// is missing every key.
fn compute_coverage(table: &TranslationTable, source: &Messages, locale: &str) -> LocaleCoverage {
    let empty = Messages::new();
    let target = table.locale(locale).unwrap_or(&empty);

    let mut missing: Vec<String> = source
        .keys()
        .filter(|key| !target.contains_key(*key))
        .cloned()
        .collect();
    missing.sort();

    let mut extra: Vec<String> = target
        .keys()
        .filter(|key| !source.contains_key(*key))
        .cloned()
        .collect();
    extra.sort();

    LocaleCoverage {
        locale: locale.to_string(),
        translated: source.len() - missing.len(),
        missing,
        extra,
    }
}
