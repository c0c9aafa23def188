//! Table formatting utilities for CLI output.

use comfy_table::{presets, ContentArrangement, Table};

/// Coverage data for a single locale.
pub struct LocaleCoverage {
    /// Locale code (e.g., "es", "fr").
    pub locale: String,
    /// Number of source keys present in this locale.
    pub translated: usize,
    /// Source keys missing from this locale, sorted.
    pub missing: Vec<String>,
    /// Keys present in this locale but not in the source, sorted.
    pub extra: Vec<String>,
}

/// Format coverage data as an ASCII table.
pub fn format_coverage_table(source_count: usize, coverage: &[LocaleCoverage]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Locale", "Coverage", "Missing", "Extra"]);

    for locale in coverage {
        table.add_row(vec![
            locale.locale.clone(),
            format!("{}/{}", locale.translated, source_count),
            locale.missing.len().to_string(),
            locale.extra.len().to_string(),
        ]);
    }

    table
}
