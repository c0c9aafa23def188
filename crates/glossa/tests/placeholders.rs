//! Integration tests for placeholder substitution.

use std::borrow::Cow;

use glossa::{Replacements, Value, replacements, substitute};
use insta::assert_snapshot;

// =========================================================================
// No-op Cases
// =========================================================================

#[test]
fn no_replacements_returns_input_borrowed() {
    let out = substitute("Hello :name {name}", &Replacements::new());
    assert!(matches!(out, Cow::Borrowed("Hello :name {name}")));
}

#[test]
fn text_without_placeholders_is_unchanged() {
    let out = substitute("plain text", &replacements! { "name" => "x" });
    assert_eq!(out, "plain text");
}

#[test]
fn unknown_placeholders_kept_verbatim() {
    let out = substitute("a :other {other} b", &replacements! { "name" => "x" });
    assert!(matches!(out, Cow::Borrowed("a :other {other} b")));
}

// =========================================================================
// Syntaxes
// =========================================================================

#[test]
fn both_syntaxes_replace_every_occurrence() {
    let out = substitute(
        ":name and {name}, again :name and {name}",
        &replacements! { "name" => "Jo" },
    );
    assert_eq!(out, "Jo and Jo, again Jo and Jo");
}

#[test]
fn colon_placeholder_at_end_of_string() {
    let out = substitute("Bye :name", &replacements! { "name" => "Jo" });
    assert_eq!(out, "Bye Jo");
}

#[test]
fn colon_placeholder_followed_by_punctuation_or_unicode() {
    let r = replacements! { "name" => "Jo" };
    assert_eq!(substitute(":name.", &r), "Jo.");
    assert_eq!(substitute(":name-x", &r), "Jo-x");
    assert_eq!(substitute(":nameé", &r), "Joé");
}

#[test]
fn colon_placeholder_not_matched_as_prefix() {
    let r = replacements! { "name" => "Jo" };
    assert_eq!(substitute(":namex", &r), ":namex");
    assert_eq!(substitute(":name_x", &r), ":name_x");
    assert_eq!(substitute(":name2", &r), ":name2");
}

#[test]
fn longer_and_shorter_names_resolve_independently() {
    let r = replacements! { "name" => "A", "name_full" => "B" };
    assert_eq!(substitute(":name / :name_full", &r), "A / B");
}

#[test]
fn names_may_contain_non_word_characters() {
    let r = replacements! { "user.name" => "Jo" };
    assert_eq!(substitute("{user.name} / :user.name", &r), "Jo / Jo");

    let r = replacements! { "user-name" => "Jo" };
    assert_eq!(substitute("Hi :user-name!", &r), "Hi Jo!");
    assert_eq!(substitute("Hi :user-names!", &r), "Hi :user-names!");
}

#[test]
fn colon_picks_longest_key_ending_at_boundary() {
    let r = replacements! { "user" => "U", "user.name" => "N" };
    assert_eq!(substitute(":user.name :user.id :user", &r), "N U.id U");
}

#[test]
fn colon_placeholder_inside_unknown_braces() {
    assert_eq!(substitute("{a:b}", &replacements! { "b" => "X" }), "{aX}");
    assert_eq!(substitute("{:name}", &replacements! { "name" => "Jo" }), "{Jo}");
}

#[test]
fn known_brace_name_wins_over_inner_colon() {
    let r = replacements! { "a:b" => "whole", "b" => "part" };
    assert_eq!(substitute("{a:b}", &r), "whole");
}

#[test]
fn doubled_colon_and_braces() {
    let r = replacements! { "n" => "1" };
    assert_eq!(substitute("::n", &r), ":1");
    assert_eq!(substitute("{{n}}", &r), "{1}");
}

#[test]
fn unbalanced_brace_is_literal() {
    let r = replacements! { "n" => "1" };
    assert_eq!(substitute("{n", &r), "{n");
    assert_eq!(substitute("n}", &r), "n}");
}

// =========================================================================
// Values
// =========================================================================

#[test]
fn numeric_values_render_in_decimal() {
    let r = replacements! { "i" => -12, "f" => 2.5, "whole" => 3.0 };
    assert_snapshot!(substitute(":i {f} :whole", &r).into_owned(), @"-12 2.5 3");
}

#[test]
fn substituted_values_are_not_rescanned() {
    let r = replacements! { "a" => ":b", "b" => "{a}" };
    assert_snapshot!(substitute(":a {b}", &r).into_owned(), @":b {a}");
}

#[test]
fn replacement_order_does_not_matter() {
    let forward: Replacements = [
        ("first".to_string(), Value::from("1")),
        ("second".to_string(), Value::from("2")),
    ]
    .into_iter()
    .collect();
    let reverse: Replacements = [
        ("second".to_string(), Value::from("2")),
        ("first".to_string(), Value::from("1")),
    ]
    .into_iter()
    .collect();

    let text = "{first}:second :first{second}";
    assert_eq!(substitute(text, &forward), substitute(text, &reverse));
    assert_eq!(substitute(text, &forward), "12 12");
}
