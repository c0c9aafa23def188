//! Derived view of the host's locale context.
//!
//! The accessor holds no state of its own. Each read projects the externally
//! owned context and table as they are at the moment of the call.

use std::sync::LazyLock;

#[cfg(feature = "global-table")]
use crate::global;
use crate::resolver::Translator;
use crate::table::{Messages, TranslationTable};
use crate::types::{AvailableLocales, DEFAULT_LOCALE, Direction, LocaleContext};

static EMPTY_MESSAGES: LazyLock<Messages> = LazyLock::new(Messages::new);
static EMPTY_LOCALES: LazyLock<AvailableLocales> = LazyLock::new(AvailableLocales::new);

/// Read-only projection of `{ current locale, direction, available locales,
/// active translations }`.
///
/// # Example
///
/// ```
/// use glossa::{LocaleAccessor, LocaleContext, TranslationTable, Direction};
///
/// let mut table = TranslationTable::new();
/// table.insert("en", "welcome", "Welcome");
///
/// let context = LocaleContext::default();
/// let accessor = LocaleAccessor::new(Some(&table), &context);
///
/// assert_eq!(accessor.current_locale(), "en");
/// assert_eq!(accessor.direction(), Direction::Ltr);
/// assert_eq!(accessor.active_translations()["welcome"], "Welcome");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LocaleAccessor<'a> {
    table: Option<&'a TranslationTable>,
    context: &'a LocaleContext,
}

impl<'a> LocaleAccessor<'a> {
    /// `table` is `None` when the host has not populated translations yet.
    pub fn new(table: Option<&'a TranslationTable>, context: &'a LocaleContext) -> Self {
        Self { table, context }
    }

    /// Build an accessor over the process-wide table.
    #[cfg(feature = "global-table")]
    pub fn from_global(context: &'a LocaleContext) -> Self {
        Self::new(global::translations(), context)
    }

    /// The current locale code, or [`DEFAULT_LOCALE`].
    pub fn current_locale(&self) -> &'a str {
        self.context.current.as_deref().unwrap_or(DEFAULT_LOCALE)
    }

    /// The current text direction, or left-to-right.
    pub fn direction(&self) -> Direction {
        self.context.dir.unwrap_or_default()
    }

    /// Available locales in host order, or an empty mapping.
    pub fn available_locales(&self) -> &'a AvailableLocales {
        self.context.available.as_ref().unwrap_or(&*EMPTY_LOCALES)
    }

    /// Messages for the current locale, or an empty mapping if the table or
    /// the locale entry is missing.
    pub fn active_translations(&self) -> &'a Messages {
        self.table
            .and_then(|table| table.locale(self.current_locale()))
            .unwrap_or(&*EMPTY_MESSAGES)
    }

    /// A resolver over the active translations.
    pub fn translator(&self) -> Translator<'a> {
        Translator::new(self.active_translations(), self.available_locales())
    }

    pub fn context(&self) -> &'a LocaleContext {
        self.context
    }
}
