use std::fmt::{Display, Formatter, Result as FmtResult};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Locale code used when the host does not supply one.
pub const DEFAULT_LOCALE: &str = "en";

/// Available locales keyed by code, in the order the host listed them.
pub type AvailableLocales = IndexMap<String, LocaleMeta>;

/// Text direction of a locale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Display metadata for one available locale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleMeta {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub flag: String,
    #[serde(default)]
    pub dir: Direction,
}

/// Locale state supplied by the host for the current page.
///
/// Every field may be missing; readers apply defaults rather than failing.
///
/// # Example
///
/// ```
/// use glossa::{Direction, LocaleContext};
///
/// let context: LocaleContext = serde_json::from_str(r#"{
///     "current": "ar",
///     "dir": "rtl",
///     "available": {
///         "en": { "label": "English", "flag": "gb", "dir": "ltr" },
///         "ar": { "label": "العربية", "flag": "sa", "dir": "rtl" }
///     }
/// }"#).unwrap();
///
/// assert_eq!(context.current.as_deref(), Some("ar"));
/// assert_eq!(context.dir, Some(Direction::Rtl));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocaleContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<Direction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available: Option<AvailableLocales>,
}

impl LocaleContext {
    /// A context with only the current locale set.
    pub fn with_current(current: impl Into<String>) -> Self {
        Self {
            current: Some(current.into()),
            ..Self::default()
        }
    }
}

/// The host's page state. Only the `locale` entry is read; other props are
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<LocaleContext>,
}

impl PageProps {
    pub fn new(locale: LocaleContext) -> Self {
        Self {
            locale: Some(locale),
        }
    }
}
