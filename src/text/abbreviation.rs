//! Abbreviation expansion for driller shorthand ("cl" -> "clay").

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashMap;

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").unwrap());

/// Expands abbreviations in a raw description.
///
/// Implementations must be pure: the same input always yields the same output.
pub trait AbbreviationExpander: Send + Sync {
    /// Returns `text` with abbreviations replaced by their expansions.
    fn expand_abbreviations(&self, text: &str) -> String;
}

/// Expander that returns its input unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoExpansion;

impl AbbreviationExpander for NoExpansion {
    fn expand_abbreviations(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Whole-word lookup table of abbreviations.
///
/// Only complete words are replaced; punctuation and spacing around them are
/// kept as they are.
#[derive(Debug, Clone, Default)]
pub struct AbbreviationMap {
    expansions: HashMap<String, String>,
}

impl AbbreviationMap {
    /// Creates an expander from an abbreviation -> expansion table.
    pub fn new(expansions: HashMap<String, String>) -> Self {
        Self { expansions }
    }

    /// Adds or replaces one abbreviation.
    pub fn insert(&mut self, abbreviation: impl Into<String>, expansion: impl Into<String>) {
        self.expansions.insert(abbreviation.into(), expansion.into());
    }

    /// Number of known abbreviations.
    pub fn len(&self) -> usize {
        self.expansions.len()
    }

    /// Returns true if no abbreviations are known.
    pub fn is_empty(&self) -> bool {
        self.expansions.is_empty()
    }
}

impl FromIterator<(String, String)> for AbbreviationMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl AbbreviationExpander for AbbreviationMap {
    fn expand_abbreviations(&self, text: &str) -> String {
        if self.expansions.is_empty() {
            return text.to_string();
        }
        WORD.replace_all(text, |caps: &Captures| {
            let word = &caps[0];
            match self.expansions.get(word) {
                Some(expansion) => expansion.clone(),
                None => word.to_string(),
            }
        })
        .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn driller_shorthand() -> AbbreviationMap {
        [("cl", "clay"), ("sst", "sandstone"), ("f", "fine")]
            .iter()
            .map(|(a, e)| (a.to_string(), e.to_string()))
            .collect()
    }

    #[test]
    fn test_no_expansion() {
        assert_eq!(NoExpansion.expand_abbreviations("Cl, sst"), "Cl, sst");
    }

    #[test]
    fn test_whole_words_only() {
        let map = driller_shorthand();
        assert_eq!(map.expand_abbreviations("f sst, cl"), "fine sandstone, clay");
        // "clay" contains "cl" but is not the word "cl"
        assert_eq!(map.expand_abbreviations("clay"), "clay");
    }

    #[test]
    fn test_spacing_preserved() {
        let map = driller_shorthand();
        assert_eq!(map.expand_abbreviations("  cl  /sst "), "  clay  /sandstone ");
    }

    #[test]
    fn test_empty_map() {
        let map = AbbreviationMap::default();
        assert!(map.is_empty());
        assert_eq!(map.expand_abbreviations("cl"), "cl");
    }
}
