//! Token -> lithology class lexicons.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ops::Deref;

/// Lithology classes recognised by the default lexicon.
///
/// Basalt is left out on purpose: in the reference logs it mostly shows up as
/// a transcription mistake.
pub const DEFAULT_LITHOLOGIES: &[&str] = &[
    "sand",
    "sandstone",
    "clay",
    "limestone",
    "shale",
    "coffee",
    "silt",
    "gravel",
    "granite",
    "soil",
    "loam",
];

const DEFAULT_SYNONYMS: &[(&str, &str)] = &[
    ("sands", "sand"),
    ("clays", "clay"),
    ("shales", "shale"),
    ("claystone", "clay"),
    ("siltstone", "silt"),
    ("limesand", "sand"),
    ("calcarenite", "limestone"),
    ("calcitareous", "limestone"),
    ("mudstone", "silt"),
    ("capstone", "limestone"),
    ("ironstone", "sandstone"),
    ("topsoil", "soil"),
];

const DEFAULT_ADJECTIVES: &[(&str, &str)] = &[
    ("sandy", "sand"),
    ("clayey", "clay"),
    ("clayish", "clay"),
    ("shaley", "shale"),
    ("silty", "silt"),
    ("gravelly", "gravel"),
];

/// Exact token -> class label mapping.
///
/// Many tokens may map to one class. Lookups are exact: tokens are expected
/// to be normalized already.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lexicon {
    entries: HashMap<String, String>,
}

impl Lexicon {
    /// Creates an empty lexicon.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the class of a token.
    pub fn insert(&mut self, token: impl Into<String>, class: impl Into<String>) {
        self.entries.insert(token.into(), class.into());
    }

    /// Returns the class label of `token`, if any.
    #[inline]
    pub fn get(&self, token: &str) -> Option<&str> {
        self.entries.get(token).map(String::as_str)
    }

    /// Returns true if `token` is a key.
    #[inline]
    pub fn contains(&self, token: &str) -> bool {
        self.entries.contains_key(token)
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the lexicon has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over (token, class) pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let mut lexicon = Self::new();
        for (token, class) in pairs {
            lexicon.insert(*token, *class);
        }
        lexicon
    }
}

impl FromIterator<(String, String)> for Lexicon {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Lexicon of lithology nouns ("clay", "claystone", ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexiconDict(Lexicon);

impl LexiconDict {
    /// Wraps a lexicon.
    pub fn new(lexicon: Lexicon) -> Self {
        Self(lexicon)
    }

    /// Lexicon in which every label maps to itself.
    pub fn identity<S: AsRef<str>>(labels: &[S]) -> Self {
        Self(
            labels
                .iter()
                .map(|l| (l.as_ref().to_string(), l.as_ref().to_string()))
                .collect(),
        )
    }

    /// Adds or replaces one entry.
    pub fn insert(&mut self, token: impl Into<String>, class: impl Into<String>) {
        self.0.insert(token, class);
    }
}

impl Default for LexiconDict {
    /// Default lithologies mapped to themselves, plus plural and rock-name
    /// synonyms.
    fn default() -> Self {
        let mut dict = Self::identity(DEFAULT_LITHOLOGIES);
        for (token, class) in DEFAULT_SYNONYMS {
            dict.insert(*token, *class);
        }
        dict
    }
}

impl Deref for LexiconDict {
    type Target = Lexicon;

    fn deref(&self) -> &Lexicon {
        &self.0
    }
}

/// Lexicon of adjectival markers ("sandy", "clayey", ...).
///
/// Consulted before [`LexiconDict`] when looking for a secondary lithology.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjectiveLexiconDict(Lexicon);

impl AdjectiveLexiconDict {
    /// Wraps a lexicon.
    pub fn new(lexicon: Lexicon) -> Self {
        Self(lexicon)
    }

    /// Adds or replaces one entry.
    pub fn insert(&mut self, token: impl Into<String>, class: impl Into<String>) {
        self.0.insert(token, class);
    }
}

impl Default for AdjectiveLexiconDict {
    fn default() -> Self {
        Self(Lexicon::from_pairs(DEFAULT_ADJECTIVES))
    }
}

impl Deref for AdjectiveLexiconDict {
    type Target = Lexicon;

    fn deref(&self) -> &Lexicon {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lexicon_identity_entries() {
        let dict = LexiconDict::default();
        for label in DEFAULT_LITHOLOGIES {
            assert_eq!(dict.get(label), Some(*label));
        }
        assert!(!dict.contains("basalt"));
    }

    #[test]
    fn test_default_lexicon_synonyms() {
        let dict = LexiconDict::default();
        assert_eq!(dict.get("claystone"), Some("clay"));
        assert_eq!(dict.get("ironstone"), Some("sandstone"));
        assert_eq!(dict.get("topsoil"), Some("soil"));
        assert_eq!(dict.len(), DEFAULT_LITHOLOGIES.len() + DEFAULT_SYNONYMS.len());
    }

    #[test]
    fn test_default_adjectives() {
        let adjectives = AdjectiveLexiconDict::default();
        assert_eq!(adjectives.get("sandy"), Some("sand"));
        assert_eq!(adjectives.get("clayish"), Some("clay"));
        assert_eq!(adjectives.get("sand"), None);
        assert_eq!(adjectives.len(), 6);
    }

    #[test]
    fn test_custom_lexicon() {
        let mut dict = LexiconDict::identity(&["basalt"]);
        dict.insert("basalts", "basalt");
        assert_eq!(dict.get("basalts"), Some("basalt"));
        assert_eq!(dict.len(), 2);
    }
}
