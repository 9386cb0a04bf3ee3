//! Record-value tokenization.
//!
//! Splits a text value into normalized word tokens: lower-cased with
//! Rust's locale-independent Unicode mapping, separated on single ASCII
//! space characters. Other whitespace (tabs, newlines) is *not* a
//! separator and stays inside tokens, matching the naive-split
//! semantics of the classic word-count topology.
//!
//! Runs of consecutive spaces would produce empty tokens under a naive
//! split; those are dropped here. The choice is applied consistently:
//! no caller ever sees an empty token.

/// A normalized word extracted from a record's text value.
pub type Token = String;

/// Tokenizes `text` into lower-cased, space-delimited words.
///
/// Pure function: no side effects, and `tokenize(s) == tokenize(s)`
/// for any `s`. Returns a materialized sequence so callers can iterate
/// while mutating their own state.
///
/// # Examples
///
/// ```
/// use wordstream_core::tokenize;
///
/// assert_eq!(tokenize("Hello HELLO"), vec!["hello", "hello"]);
/// assert_eq!(tokenize("a  b"), vec!["a", "b"]);
/// assert!(tokenize("   ").is_empty());
/// ```
#[must_use]
pub fn tokenize(text: &str) -> Vec<Token> {
    text.to_lowercase()
        .split(' ')
        .filter(|word| !word.is_empty())
        .map(str::to_owned)
        .collect()
}
