mod context;
mod value;

pub use context::{
    AvailableLocales, DEFAULT_LOCALE, Direction, LocaleContext, LocaleMeta, PageProps,
};
pub use value::{Replacements, Value};
