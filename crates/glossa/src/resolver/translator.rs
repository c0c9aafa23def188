//! Key lookup over one locale's messages.

use tracing::trace;

use crate::resolver::placeholder::substitute;
use crate::table::Messages;
use crate::types::{AvailableLocales, Replacements, Value};

/// Resolves translation keys against the active locale's messages.
///
/// Every operation is total: a missing key, an empty key or missing locale
/// data produce a defined string, never an error.
///
/// # Example
///
/// ```
/// use glossa::{Messages, Translator, AvailableLocales, replacements};
///
/// let messages = Messages::from([
///     ("greeting".to_string(), "Hello :name!".to_string()),
/// ]);
/// let available = AvailableLocales::new();
/// let translator = Translator::new(&messages, &available);
///
/// assert_eq!(translator.t("greeting", &replacements! { "name" => "John" }, None), "Hello John!");
/// assert_eq!(translator.t("missing.key", &replacements! {}, None), "missing.key");
/// assert_eq!(translator.t("x", &replacements! {}, Some("Default Text")), "Default Text");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Translator<'a> {
    messages: &'a Messages,
    available: &'a AvailableLocales,
}

impl<'a> Translator<'a> {
    pub fn new(messages: &'a Messages, available: &'a AvailableLocales) -> Self {
        Self {
            messages,
            available,
        }
    }

    /// The messages this translator reads from.
    pub fn messages(&self) -> &'a Messages {
        self.messages
    }

    /// Translate `key`, falling back to `fallback` and then to the key
    /// itself, and substitute `replacements` into the chosen string.
    pub fn translate(
        &self,
        key: &str,
        replacements: &Replacements,
        fallback: Option<&str>,
    ) -> String {
        let source = match self.messages.get(key) {
            Some(message) => message.as_str(),
            None => {
                trace!(key, has_fallback = fallback.is_some(), "translation missing");
                fallback.unwrap_or(key)
            }
        };
        substitute(source, replacements).into_owned()
    }

    /// Alias of [`Translator::translate`].
    pub fn t(&self, key: &str, replacements: &Replacements, fallback: Option<&str>) -> String {
        self.translate(key, replacements, fallback)
    }

    /// Alias of [`Translator::translate`].
    pub fn trans(&self, key: &str, replacements: &Replacements, fallback: Option<&str>) -> String {
        self.translate(key, replacements, fallback)
    }

    /// True iff `key` is an entry of the active messages.
    pub fn exists(&self, key: &str) -> bool {
        self.messages.contains_key(key)
    }

    /// Translate `key` with `count` added to the replacements.
    ///
    /// `count` overrides a `count` entry already present in `replacements`.
    ///
    /// This does not pick a plural form. A message such as
    /// `"one apple|many apples"` is returned whole, with `count`
    /// substituted wherever it appears; form selection is expected to happen
    /// upstream, in the generated strings.
    pub fn pluralize(
        &self,
        key: &str,
        count: impl Into<Value>,
        replacements: &Replacements,
    ) -> String {
        let mut with_count = replacements.clone();
        with_count.insert("count".to_string(), count.into());
        self.translate(key, &with_count, None)
    }

    /// Available locale codes in the order the host listed them.
    pub fn get_locales(&self) -> Vec<&'a str> {
        self.available.keys().map(String::as_str).collect()
    }
}
