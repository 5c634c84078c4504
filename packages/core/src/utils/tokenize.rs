//! Body-text tokenization for the lexical-similarity pass
//!
//! Splits note bodies on non-word boundaries and keeps only tokens long
//! enough to be meaningful. This is deliberately a shallow heuristic, not
//! semantic analysis: two notes relate when they literally share words.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Compiled splitter: one or more non-word characters.
static NON_WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\W+").unwrap());

/// Minimum token length kept by [`content_tokens`]; shorter tokens are
/// dropped as noise ("the", "and", ids like "a1").
pub const MIN_TOKEN_LEN: usize = 4;

/// Extract the significant token set from a note body.
///
/// Tokens are lowercased so matching is case-insensitive, split on
/// non-word boundaries, and dropped when shorter than [`MIN_TOKEN_LEN`].
///
/// # Examples
///
/// ```
/// use notegraph_core::utils::content_tokens;
///
/// let tokens = content_tokens("The FOMC minutes point to a rate pause.");
/// assert!(tokens.contains("fomc"));
/// assert!(tokens.contains("minutes"));
/// assert!(!tokens.contains("the"));
/// assert!(!tokens.contains("to"));
/// ```
pub fn content_tokens(text: &str) -> HashSet<String> {
    NON_WORD_RE
        .split(text)
        .filter(|token| token.chars().count() >= MIN_TOKEN_LEN)
        .map(|token| token.to_lowercase())
        .collect()
}
