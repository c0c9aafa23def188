//! CLI command implementations.

mod check;
mod coverage;
mod translate;
mod watch;

pub use check::{run_check, CheckArgs};
pub use coverage::{run_coverage, CoverageArgs};
pub use translate::{run_translate, TranslateArgs};
pub use watch::{run_watch, WatchArgs};

use std::path::Path;

use glossa::TranslationTable;
use miette::miette;

/// Load every translation file in `dir`.
fn load_table(dir: &Path) -> miette::Result<TranslationTable> {
    let mut table = TranslationTable::new();
    table
        .load_dir(dir)
        .map_err(|e| miette!("Failed to load translations from {}: {}", dir.display(), e))?;
    Ok(table)
}
