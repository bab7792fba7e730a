//! Bag-of-words normalizer shared by job keyword extraction and candidate tokens.
//!
//! No stemming, no stopwords, no locale rules. Short shared tokens ("a", "c")
//! will overlap across unrelated texts; that imprecision is part of the scoring contract.

use std::collections::HashSet;

pub type TokenSet = HashSet<String>;

/// Lowercases, replaces everything except letters, digits, `_` and whitespace
/// with a space, then collapses runs of whitespace.
pub fn normalize(text: &str) -> String {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
pub fn tokenize(text: &str) -> TokenSet {
    let mut tokens = TokenSet::new();
    extend_tokens(&mut tokens, text);
    tokens
}

/// Adds the normalized tokens of `text` to `tokens`.
pub fn extend_tokens(tokens: &mut TokenSet, text: &str) {
    tokens.extend(normalize(text).split_whitespace().map(str::to_owned));
}
