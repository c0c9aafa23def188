//! Translation resolution.
//!
//! Looks keys up in the active locale's messages, applies the fallback
//! policy and substitutes placeholders.

mod placeholder;
mod translator;

pub use placeholder::substitute;
pub use translator::Translator;
