//! Whitespace tokenization of captured text.

use alloc::{string::String, vec::Vec};

/// Split `text` on runs of whitespace. No case or punctuation normalization.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(String::from).collect()
}

/// Number of tokens `tokenize` would produce, without allocating.
pub fn count_tokens(text: &str) -> usize {
    text.split_whitespace().count()
}
