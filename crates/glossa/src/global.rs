//! Process-wide translation table for the `global-table` feature.
//!
//! Hosts that populate translations once at startup can install the table
//! here instead of threading it through every call site. Reads before
//! installation see no table, which accessors treat as empty translations.

use std::sync::OnceLock;

use tracing::{debug, warn};

use crate::TranslationTable;

static GLOBAL_TABLE: OnceLock<TranslationTable> = OnceLock::new();

/// Install the process-wide table.
///
/// The table is write-once: returns `false`, leaving the installed table in
/// place, if one was already installed.
pub fn install_translations(table: TranslationTable) -> bool {
    let locales = table.len();
    match GLOBAL_TABLE.set(table) {
        Ok(()) => {
            debug!(locales, "installed global translation table");
            true
        }
        Err(_) => {
            warn!("global translation table already installed; ignoring replacement");
            false
        }
    }
}

/// The installed table, if any.
pub fn translations() -> Option<&'static TranslationTable> {
    GLOBAL_TABLE.get()
}
