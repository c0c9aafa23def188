//! Per-locale translation tables.
//!
//! The table is populated by the host from generator output (JSON files) and
//! read by the resolver. Reading a locale that was never loaded is not an
//! error; callers see an empty mapping instead.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value as JsonValue};
use tracing::debug;

use crate::error::LoadError;

/// Flat translation key to translation string mapping for one locale.
pub type Messages = HashMap<String, String>;

/// File-name prefix of backend-generated translation files. `php_en.json`
/// merges into the `en` locale.
const GENERATED_PREFIX: &str = "php_";

/// Locale code to [`Messages`] mapping.
///
/// Loading merges keys into a locale; [`TranslationTable::reload`] and
/// [`TranslationTable::load_dir`] replace.
///
/// # Example
///
/// ```
/// use glossa::TranslationTable;
///
/// let mut table = TranslationTable::new();
/// table.load_str("en", r#"{ "welcome": "Welcome", "auth": { "failed": "Nope" } }"#).unwrap();
///
/// let en = table.locale("en").unwrap();
/// assert_eq!(en["welcome"], "Welcome");
/// assert_eq!(en["auth.failed"], "Nope");
/// ```
#[derive(Debug, Clone, Default)]
pub struct TranslationTable {
    /// Messages per locale code.
    locales: HashMap<String, Messages>,

    /// Files each locale was loaded from, in load order. Only populated for
    /// file-loaded translations.
    loaded_paths: HashMap<String, Vec<PathBuf>>,
}

impl TranslationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a whole table of the shape `{ "<locale>": { "<key>": "<text>" } }`.
    pub fn from_json_str(content: &str) -> Result<Self, LoadError> {
        let path = PathBuf::from("<table>");
        let root: JsonValue =
            serde_json::from_str(content).map_err(|e| LoadError::json(path.clone(), e))?;
        let JsonValue::Object(locales) = root else {
            return Err(LoadError::NotAnObject {
                path,
                found: json_kind(&root),
            });
        };

        let mut table = Self::new();
        for (locale, messages) in &locales {
            let JsonValue::Object(messages) = messages else {
                return Err(LoadError::NotAnObject {
                    path: PathBuf::from(format!("<table:{locale}>")),
                    found: json_kind(messages),
                });
            };
            let target = table.locales.entry(locale.clone()).or_default();
            flatten_into("", messages, target, &path)?;
        }
        Ok(table)
    }

    // =========================================================================
    // Access
    // =========================================================================

    /// Messages for `locale`, if any were loaded.
    pub fn locale(&self, locale: &str) -> Option<&Messages> {
        self.locales.get(locale)
    }

    pub fn contains_locale(&self, locale: &str) -> bool {
        self.locales.contains_key(locale)
    }

    /// Loaded locale codes, sorted.
    pub fn locales(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.locales.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    /// Number of loaded locales.
    pub fn len(&self) -> usize {
        self.locales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Replace all messages of `locale`.
    pub fn insert_locale(&mut self, locale: impl Into<String>, messages: Messages) {
        let locale = locale.into();
        self.loaded_paths.remove(&locale);
        self.locales.insert(locale, messages);
    }

    /// Insert a single message, returning the previous text for that key.
    pub fn insert(
        &mut self,
        locale: impl Into<String>,
        key: impl Into<String>,
        text: impl Into<String>,
    ) -> Option<String> {
        self.locales
            .entry(locale.into())
            .or_default()
            .insert(key.into(), text.into())
    }

    /// Remove a locale and forget where it was loaded from.
    pub fn remove_locale(&mut self, locale: &str) -> Option<Messages> {
        self.loaded_paths.remove(locale);
        self.locales.remove(locale)
    }

    pub fn clear(&mut self) {
        self.locales.clear();
        self.loaded_paths.clear();
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Merge a JSON object of translations into `locale`.
    ///
    /// Nested objects flatten into dot-joined keys. Returns the number of
    /// keys read.
    pub fn load_str(&mut self, locale: &str, content: &str) -> Result<usize, LoadError> {
        let (parsed, count) = parse_messages(content, &PathBuf::from(format!("<{locale}>")))?;
        self.merge(locale, parsed);
        Ok(count)
    }

    /// Merge a JSON translation file into `locale`.
    ///
    /// The path is remembered for [`TranslationTable::reload`].
    pub fn load_file(&mut self, locale: &str, path: impl AsRef<Path>) -> Result<usize, LoadError> {
        let path = path.as_ref();
        let (parsed, count) = read_messages(path)?;
        self.merge(locale, parsed);

        self.loaded_paths
            .entry(locale.to_string())
            .or_default()
            .push(path.to_path_buf());
        debug!(locale, path = %path.display(), count, "loaded translation file");

        Ok(count)
    }

    /// Replace the table with every `*.json` file in `dir`.
    ///
    /// The file stem names the locale. Backend-generated `php_<locale>.json`
    /// files merge into the same locale as `<locale>.json`, with the plain
    /// file winning on conflicting keys. Returns the number of files loaded.
    /// On error the table is left as it was.
    pub fn load_dir(&mut self, dir: impl AsRef<Path>) -> Result<usize, LoadError> {
        let dir = dir.as_ref();
        let io_error = |source| LoadError::Io {
            path: dir.to_path_buf(),
            source,
        };

        let mut files: Vec<(String, PathBuf)> = Vec::new();
        for entry in fs::read_dir(dir).map_err(io_error)? {
            let path = entry.map_err(io_error)?.path();
            if !path.is_file() || path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                files.push((stem.to_string(), path.clone()));
            }
        }
        // Generated files first so hand-written ones override them.
        files.sort_by(|(a, _), (b, _)| {
            let a_plain = !a.starts_with(GENERATED_PREFIX);
            let b_plain = !b.starts_with(GENERATED_PREFIX);
            (a_plain, a).cmp(&(b_plain, b))
        });

        let mut loaded = Self::new();
        for (stem, path) in &files {
            let locale = stem.strip_prefix(GENERATED_PREFIX).unwrap_or(stem);
            loaded.load_file(locale, path)?;
        }
        *self = loaded;
        debug!(
            dir = %dir.display(),
            files = files.len(),
            locales = self.len(),
            "loaded translation directory"
        );

        Ok(files.len())
    }

    /// Re-read every file `locale` was loaded from, replacing its messages.
    ///
    /// Returns the number of keys read across those files. If any file
    /// fails, the locale keeps its current messages and remembered paths.
    pub fn reload(&mut self, locale: &str) -> Result<usize, LoadError> {
        let paths = self
            .loaded_paths
            .get(locale)
            .filter(|paths| !paths.is_empty())
            .ok_or_else(|| LoadError::NoPathForReload {
                locale: locale.to_string(),
            })?;

        let mut messages = Messages::new();
        let mut count = 0;
        for path in paths {
            let (parsed, read) = read_messages(path)?;
            messages.extend(parsed);
            count += read;
        }
        debug!(locale, files = paths.len(), count, "reloaded translations");

        self.locales.insert(locale.to_string(), messages);
        Ok(count)
    }

    /// Files `locale` was loaded from.
    pub fn loaded_paths(&self, locale: &str) -> &[PathBuf] {
        self.loaded_paths.get(locale).map_or(&[], Vec::as_slice)
    }

    fn merge(&mut self, locale: &str, parsed: Messages) {
        self.locales
            .entry(locale.to_string())
            .or_default()
            .extend(parsed);
    }
}

fn read_messages(path: &Path) -> Result<(Messages, usize), LoadError> {
    let content = fs::read_to_string(path).map_err(|e| LoadError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_messages(&content, path)
}

/// Parse one translation object into a fresh map, so a bad file never
/// touches loaded messages.
fn parse_messages(content: &str, path: &Path) -> Result<(Messages, usize), LoadError> {
    let root: JsonValue =
        serde_json::from_str(content).map_err(|e| LoadError::json(path.to_path_buf(), e))?;
    let JsonValue::Object(object) = root else {
        return Err(LoadError::NotAnObject {
            path: path.to_path_buf(),
            found: json_kind(&root),
        });
    };

    let mut parsed = Messages::new();
    let count = flatten_into("", &object, &mut parsed, path)?;
    Ok((parsed, count))
}

impl FromIterator<(String, Messages)> for TranslationTable {
    fn from_iter<I: IntoIterator<Item = (String, Messages)>>(iter: I) -> Self {
        Self {
            locales: iter.into_iter().collect(),
            loaded_paths: HashMap::new(),
        }
    }
}

/// Flatten a JSON object into dot-joined keys. Returns the number of leaves.
fn flatten_into(
    prefix: &str,
    object: &Map<String, JsonValue>,
    out: &mut Messages,
    path: &Path,
) -> Result<usize, LoadError> {
    let mut count = 0;
    for (key, value) in object {
        let full_key = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            JsonValue::String(text) => {
                out.insert(full_key, text.clone());
                count += 1;
            }
            JsonValue::Object(nested) => {
                count += flatten_into(&full_key, nested, out, path)?;
            }
            other => {
                return Err(LoadError::InvalidValue {
                    path: path.to_path_buf(),
                    key: full_key,
                    found: json_kind(other),
                });
            }
        }
    }
    Ok(count)
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
