pub mod accessor;
pub mod error;
#[cfg(feature = "global-table")]
pub mod global;
pub mod resolver;
pub mod store;
pub mod table;
pub mod types;

pub use accessor::LocaleAccessor;
pub use error::LoadError;
#[cfg(feature = "global-table")]
pub use global::{install_translations, translations};
pub use resolver::{Translator, substitute};
pub use store::{LocaleStore, SubscriptionId};
pub use table::{Messages, TranslationTable};
pub use types::{
    AvailableLocales, DEFAULT_LOCALE, Direction, LocaleContext, LocaleMeta, PageProps,
    Replacements, Value,
};

/// Creates a [`Replacements`] map from key-value pairs.
///
/// Values are converted via `Into<Value>`, so integers, floats and strings
/// can be passed directly.
///
/// # Example
///
/// ```
/// use glossa::{replacements, Value};
///
/// let r = replacements! { "count" => 3, "name" => "Alice" };
/// assert_eq!(r.len(), 2);
/// assert_eq!(r["count"].as_number(), Some(3));
/// assert_eq!(r["name"].as_string(), Some("Alice"));
/// ```
#[macro_export]
macro_rules! replacements {
    {} => {
        $crate::Replacements::new()
    };
    { $($key:expr => $value:expr),+ $(,)? } => {
        {
            let mut map = $crate::Replacements::new();
            $(
                map.insert($key.to_string(), ::std::convert::Into::<$crate::Value>::into($value));
            )+
            map
        }
    };
}
