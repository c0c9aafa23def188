//! Implementation of the `glossa translate` command.

use std::fs::read_to_string;
use std::path::PathBuf;
use std::sync::Arc;

use glossa::{LocaleStore, PageProps, Replacements, Value};
use serde::Serialize;

use super::load_table;

/// Arguments for the translate command.
#[derive(Debug, clap::Args)]
pub struct TranslateArgs {
    /// Translation key to resolve
    pub key: String,

    /// Directory containing translation JSON files
    #[arg(long, env = "GLOSSA_LANG_DIR", default_value = "lang")]
    pub dir: PathBuf,

    /// JSON file with page props supplying the locale context
    #[arg(long)]
    pub props: Option<PathBuf>,

    /// Current locale (overrides the props file)
    #[arg(long)]
    pub locale: Option<String>,

    /// Replacements in name=value format (repeatable)
    #[arg(short = 'p', long = "param", value_parser = parse_key_val)]
    pub params: Vec<(String, String)>,

    /// Text used when the key is missing
    #[arg(long)]
    pub fallback: Option<String>,

    /// Resolve through pluralize with this count
    #[arg(long, allow_negative_numbers = true)]
    pub count: Option<i64>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for translate results.
#[derive(Serialize)]
pub struct TranslateResult<'a> {
    pub locale: &'a str,
    pub key: &'a str,
    pub exists: bool,
    pub result: String,
}

/// Parse a key=value parameter string.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid parameter format '{}': expected name=value", s))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}

/// Run the translate command.
pub fn run_translate(args: TranslateArgs) -> miette::Result<i32> {
    let table = load_table(&args.dir)?;

    let mut props = match &args.props {
        Some(path) => {
            let content = read_to_string(path).map_err(|e| {
                miette::miette!("Cannot read props file {}: {}", path.display(), e)
            })?;
            serde_json::from_str::<PageProps>(&content).map_err(|e| {
                miette::miette!("Invalid props file {}: {}", path.display(), e)
            })?
        }
        None => PageProps::default(),
    };
    if let Some(locale) = args.locale {
        props.locale.get_or_insert_with(Default::default).current = Some(locale);
    }

    let store = LocaleStore::builder()
        .translations(Arc::new(table))
        .props(props)
        .build();
    let accessor = store.accessor();
    let translator = accessor.translator();

    // Numbers stay numbers so they render the way the runtime renders them
    let replacements: Replacements = args
        .params
        .iter()
        .map(|(k, v)| (k.clone(), Value::parse_lossy(v)))
        .collect();

    let result = match args.count {
        Some(count) => translator.pluralize(&args.key, count, &replacements),
        None => translator.translate(&args.key, &replacements, args.fallback.as_deref()),
    };

    if args.json {
        let output = TranslateResult {
            locale: accessor.current_locale(),
            key: &args.key,
            exists: translator.exists(&args.key),
            result,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&output).expect("JSON serialization should not fail")
        );
    } else {
        println!("{}", result);
    }
    Ok(exitcode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_key_val_splits_on_first_equals() {
        assert_eq!(
            parse_key_val("expr=a=b"),
            Ok(("expr".to_string(), "a=b".to_string()))
        );
    }

    #[test]
    fn parse_key_val_requires_equals() {
        assert!(parse_key_val("name").is_err());
    }
}
