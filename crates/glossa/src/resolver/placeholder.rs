//! Placeholder substitution using winnow.
//!
//! Translation strings carry named slots in two syntaxes that may be mixed
//! freely:
//! - `:name`, where `name` is a replacement key followed by a non-word
//!   character or the end of the string. `:name` therefore never matches
//!   inside `:namex`. When several keys fit, the longest one wins.
//! - `{name}`, an exact brace-delimited key.
//!
//! The scanner only produces a placeholder segment for names that are keys
//! of the replacement set; everything else falls through as literal text one
//! character at a time, so a `:name` inside an unmatched `{...}` is still
//! found. The source is scanned once, so substituted values are never
//! re-scanned and the result does not depend on the order of the replacement
//! set. There is no escape syntax.

use std::borrow::Cow;

use winnow::combinator::{alt, delimited, fail, repeat};
use winnow::prelude::*;
use winnow::token::{any, take_till};

use crate::types::{Replacements, Value};

/// A piece of a scanned translation string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'i> {
    Literal(&'i str),
    Placeholder(&'i str),
}

/// The replacement keys a scan may resolve.
#[derive(Debug, Clone, Copy)]
struct Keys<'r> {
    replacements: &'r Replacements,
    /// Byte length of the longest key; bounds the colon lookahead.
    longest: usize,
}

impl<'r> Keys<'r> {
    fn new(replacements: &'r Replacements) -> Self {
        let longest = replacements.keys().map(String::len).max().unwrap_or(0);
        Self {
            replacements,
            longest,
        }
    }

    fn get(&self, name: &str) -> Option<&'r Value> {
        self.replacements.get(name)
    }

    fn contains(&self, name: &str) -> bool {
        self.replacements.contains_key(name)
    }

    /// Byte length of the longest non-empty key that `rest` starts with and
    /// that is followed by a non-word character or the end of `rest`.
    fn colon_name_len(&self, rest: &str) -> Option<usize> {
        let mut best = None;
        for (i, c) in rest.char_indices() {
            if i > self.longest {
                return best;
            }
            if i > 0 && !is_word_char(c) && self.contains(&rest[..i]) {
                best = Some(i);
            }
        }
        if !rest.is_empty() && rest.len() <= self.longest && self.contains(rest) {
            best = Some(rest.len());
        }
        best
    }
}

/// Substitute every `:name` and `{name}` occurrence whose name is a key of
/// `replacements`.
///
/// Returns the input unchanged (and borrowed) when there is nothing to
/// replace. Placeholders without a matching key are kept verbatim.
///
/// # Example
///
/// ```
/// use glossa::{replacements, substitute};
///
/// let out = substitute("Hi :name, you have {count} new", &replacements! {
///     "name" => "Jo",
///     "count" => 3,
/// });
/// assert_eq!(out, "Hi Jo, you have 3 new");
///
/// // Word boundary: `:namex` is a different placeholder.
/// let out = substitute("Hi :namex!", &replacements! { "name" => "Jo" });
/// assert_eq!(out, "Hi :namex!");
/// ```
pub fn substitute<'a>(text: &'a str, replacements: &Replacements) -> Cow<'a, str> {
    if replacements.is_empty() || !text.contains([':', '{']) {
        return Cow::Borrowed(text);
    }

    let keys = Keys::new(replacements);
    let mut remaining = text;
    let Ok(segments) = segments(&mut remaining, keys) else {
        return Cow::Borrowed(text);
    };
    if !segments
        .iter()
        .any(|segment| matches!(segment, Segment::Placeholder(_)))
    {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    for segment in segments {
        match segment {
            Segment::Literal(literal) => out.push_str(literal),
            Segment::Placeholder(name) => {
                if let Some(value) = keys.get(name) {
                    out.push_str(&value.to_string());
                }
            }
        }
    }
    Cow::Owned(out)
}

/// Scan a whole string. Never fails on well-formed UTF-8: anything that is
/// not a known placeholder falls through to a literal.
fn segments<'i>(input: &mut &'i str, keys: Keys<'_>) -> ModalResult<Vec<Segment<'i>>> {
    repeat(0.., |i: &mut &'i str| segment(i, keys)).parse_next(input)
}

fn segment<'i>(input: &mut &'i str, keys: Keys<'_>) -> ModalResult<Segment<'i>> {
    alt((
        take_till(1.., [':', '{']).map(Segment::Literal),
        |i: &mut &'i str| colon_placeholder(i, keys),
        |i: &mut &'i str| brace_placeholder(i, keys),
        // Lone `:`, unknown names, unbalanced `{`
        any.take().map(Segment::Literal),
    ))
    .parse_next(input)
}

/// `:name`
fn colon_placeholder<'i>(input: &mut &'i str, keys: Keys<'_>) -> ModalResult<Segment<'i>> {
    let current = *input;
    let Some(rest) = current.strip_prefix(':') else {
        return fail.parse_next(input);
    };
    let Some(len) = keys.colon_name_len(rest) else {
        return fail.parse_next(input);
    };
    let (name, after) = rest.split_at(len);
    *input = after;
    Ok(Segment::Placeholder(name))
}

/// `{name}`
fn brace_placeholder<'i>(input: &mut &'i str, keys: Keys<'_>) -> ModalResult<Segment<'i>> {
    delimited('{', take_till(0.., ['{', '}']), '}')
        .verify(|name: &str| keys.contains(name))
        .map(Segment::Placeholder)
        .parse_next(input)
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replacements;

    fn scan<'i>(text: &'i str, replacements: &Replacements) -> Vec<Segment<'i>> {
        let mut input = text;
        segments(&mut input, Keys::new(replacements)).unwrap()
    }

    #[test]
    fn scans_mixed_syntaxes() {
        let r = replacements! { "b" => 1, "c" => 2 };
        assert_eq!(
            scan("a :b {c} d", &r),
            vec![
                Segment::Literal("a "),
                Segment::Placeholder("b"),
                Segment::Literal(" "),
                Segment::Placeholder("c"),
                Segment::Literal(" d"),
            ]
        );
    }

    #[test]
    fn lone_colon_and_open_brace_are_literal() {
        let r = replacements! { "y" => 1 };
        assert_eq!(
            scan("x: {y", &r),
            vec![
                Segment::Literal("x"),
                Segment::Literal(":"),
                Segment::Literal(" "),
                Segment::Literal("{"),
                Segment::Literal("y"),
            ]
        );
    }

    #[test]
    fn nested_braces_match_innermost() {
        let r = replacements! { "n" => 1 };
        assert_eq!(
            scan("{{n}}", &r),
            vec![
                Segment::Literal("{"),
                Segment::Placeholder("n"),
                Segment::Literal("}"),
            ]
        );
    }

    #[test]
    fn unknown_brace_name_is_scanned_through() {
        let r = replacements! { "b" => 1 };
        assert_eq!(
            scan("{a:b}", &r),
            vec![
                Segment::Literal("{"),
                Segment::Literal("a"),
                Segment::Placeholder("b"),
                Segment::Literal("}"),
            ]
        );
    }

    #[test]
    fn colon_prefers_longest_key_at_boundary() {
        let r = replacements! { "user" => 1, "user.name" => 2 };
        assert_eq!(
            scan(":user.name!", &r),
            vec![Segment::Placeholder("user.name"), Segment::Literal("!")]
        );
        assert_eq!(
            scan(":user.id", &r),
            vec![Segment::Placeholder("user"), Segment::Literal(".id")]
        );
    }

    #[test]
    fn colon_key_must_end_at_word_boundary() {
        let r = replacements! { "user-name" => 1 };
        assert_eq!(
            scan(":user-names", &r),
            vec![
                Segment::Literal(":"),
                Segment::Literal("user-names"),
            ]
        );
    }
}
