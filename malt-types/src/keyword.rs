// malt-types - Keyword encoding
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Keywords share the string representation.
//!
//! A keyword is a [`Value::String`](crate::Value::String) whose text begins
//! with [`KEYWORD_PREFIX`] (U+029E, `ʞ`). The prefix is the only thing that
//! tells the two apart, so any ordinary string that happens to start with
//! U+029E *is* a keyword as far as every predicate is concerned. The wire
//! decoder never inspects the prefix; classification happens here, at the
//! point of use.
//!
//! Because keywords are strings, they are valid hash-map keys.

/// Marker codepoint that turns a string into a keyword.
pub const KEYWORD_PREFIX: char = '\u{029e}';

/// Encode `name` as keyword text (prefix + name).
#[must_use]
pub fn encode(name: &str) -> String {
    let mut text = String::with_capacity(name.len() + KEYWORD_PREFIX.len_utf8());
    text.push(KEYWORD_PREFIX);
    text.push_str(name);
    text
}

/// Check whether raw string text carries the keyword prefix.
#[inline]
#[must_use]
pub fn is_keyword_text(text: &str) -> bool {
    text.starts_with(KEYWORD_PREFIX)
}

/// Strip the keyword prefix, returning the bare name.
///
/// Returns `None` for text that is not keyword-encoded.
#[must_use]
pub fn name_of(text: &str) -> Option<&str> {
    text.strip_prefix(KEYWORD_PREFIX)
}
