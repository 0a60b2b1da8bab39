//! Exploration helpers for building lexicons from raw token streams.

use crate::error::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Pattern matching any token that looks lithology-related.
pub const DEFAULT_ANY_LITHO_MARKERS_RE: &str =
    r"sand|clay|ston|shale|basalt|coffee|silt|granit|soil|gravel|loam|mud|calca|calci";

/// A token and the number of times it occurs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenFrequency {
    /// The token.
    pub token: String,
    /// Occurrence count.
    pub frequency: usize,
}

/// Returns the `n_most_common` most frequent tokens, most frequent first.
///
/// Ties keep the order in which tokens first appear.
pub fn token_frequencies<S: AsRef<str>>(tokens: &[S], n_most_common: usize) -> Vec<TokenFrequency> {
    let mut first_seen: HashMap<&str, usize> = HashMap::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();

    for (i, token) in tokens.iter().enumerate() {
        let token = token.as_ref();
        first_seen.entry(token).or_insert(i);
        *counts.entry(token).or_insert(0) += 1;
    }

    let mut sorted: Vec<(&str, usize)> = counts.into_iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then(first_seen[a.0].cmp(&first_seen[b.0])));
    sorted.truncate(n_most_common);

    sorted
        .into_iter()
        .map(|(token, frequency)| TokenFrequency {
            token: token.to_string(),
            frequency,
        })
        .collect()
}

/// Tokens containing `root` surrounded by lowercase letters, e.g. every
/// "sand" derivative.
pub fn find_word_from_root<S: AsRef<str>>(tokens: &[S], root: &str) -> Result<Vec<String>> {
    let re = Regex::new(&format!("[a-z]*{}[a-z]*", root))?;
    Ok(find_litho_markers(tokens, &re))
}

/// Tokens in which `marker` finds a match, in input order.
pub fn find_litho_markers<S: AsRef<str>>(tokens: &[S], marker: &Regex) -> Vec<String> {
    tokens
        .iter()
        .map(AsRef::as_ref)
        .filter(|t| marker.is_match(t))
        .map(str::to_string)
        .collect()
}

/// Batch form of [`find_litho_markers`].
pub fn find_litho_markers_all<S: AsRef<str>>(tokens: &[Vec<S>], marker: &Regex) -> Vec<Vec<String>> {
    tokens.iter().map(|t| find_litho_markers(t, marker)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_frequencies() {
        let tokens = ["clay", "sand", "clay", "gravel", "sand", "clay", "silt"];
        let freq = token_frequencies(&tokens, 3);
        assert_eq!(freq.len(), 3);
        assert_eq!(freq[0].token, "clay");
        assert_eq!(freq[0].frequency, 3);
        assert_eq!(freq[1].token, "sand");
        // gravel and silt tie; gravel appeared first
        assert_eq!(freq[2].token, "gravel");
    }

    #[test]
    fn test_find_word_from_root() {
        let tokens = ["sandy", "clay", "sandstone", "limesand", "grey"];
        let found = find_word_from_root(&tokens, "sand").unwrap();
        assert_eq!(found, vec!["sandy", "sandstone", "limesand"]);
    }

    #[test]
    fn test_default_markers() {
        let re = Regex::new(DEFAULT_ANY_LITHO_MARKERS_RE).unwrap();
        let tokens = vec![
            vec!["brown", "mudstone", "hard"],
            vec!["calcrete"],
            vec!["water"],
        ];
        let markers = find_litho_markers_all(&tokens, &re);
        assert_eq!(markers[0], vec!["mudstone"]);
        assert!(markers[1].is_empty());
        assert!(markers[2].is_empty());
    }
}
