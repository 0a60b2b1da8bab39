//! Word tokenization of normalized descriptions.

use rayon::prelude::*;
use unicode_segmentation::UnicodeSegmentation;

/// Splits a description into an ordered sequence of lowercase word tokens.
///
/// Token order must follow the text: lithology matching is first-match by
/// token position.
pub trait WordTokenizer: Send + Sync {
    /// Tokenizes one description.
    fn tokenize(&self, text: &str) -> Vec<String>;

    /// Tokenizes descriptions elementwise, preserving order and count.
    fn tokenize_all(&self, texts: &[String]) -> Vec<Vec<String>> {
        texts.par_iter().map(|t| self.tokenize(t)).collect()
    }
}

/// Tokenizer based on Unicode word boundaries (UAX #29).
///
/// Punctuation is dropped, words are lowercased.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeTokenizer {
    /// Minimum token length in characters.
    pub min_token_length: usize,
}

impl UnicodeTokenizer {
    /// Creates a tokenizer keeping every word.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a tokenizer dropping words shorter than `min_token_length`.
    pub fn with_min_length(min_token_length: usize) -> Self {
        Self { min_token_length }
    }
}

impl WordTokenizer for UnicodeTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.unicode_words()
            .filter(|w| w.chars().count() >= self.min_token_length)
            .map(|w| w.to_lowercase())
            .collect()
    }
}
