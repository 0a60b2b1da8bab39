//! Numbered lithology vocabularies.

use crate::error::{BoreSliceError, Result};
use crate::lexicon::DEFAULT_LITHOLOGIES;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Classes used for volume interpolation of the reference aquifer model.
///
/// 0 = sand, 1 = sandstone, 2 = clay, 3 = limestone, 4 = shale, 5 = basalt,
/// 6 = coffee rock.
pub const INTERPOLATION_LITHOLOGIES: &[&str] =
    &["sand", "sandstone", "clay", "limestone", "shale", "basalt", "coffee"];

/// Ordered, closed set of lithology labels with class numbers.
///
/// Class numbers are the label positions, so the order must stay fixed for the
/// whole of an interpolation run: volume indices are derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct LithologyVocabulary {
    labels: Vec<String>,
    index: HashMap<String, u32>,
}

impl LithologyVocabulary {
    /// Creates a vocabulary; class numbers follow the order of `labels`.
    ///
    /// Fails on duplicate labels.
    pub fn new<S: AsRef<str>>(labels: &[S]) -> Result<Self> {
        let mut vocabulary = Self {
            labels: labels.iter().map(|l| l.as_ref().to_string()).collect(),
            index: HashMap::with_capacity(labels.len()),
        };
        vocabulary.rebuild_index()?;
        Ok(vocabulary)
    }

    /// Vocabulary of the default lexicon.
    pub fn default_lithologies() -> Self {
        Self::from_static(DEFAULT_LITHOLOGIES)
    }

    /// Seven-class vocabulary used for volume interpolation.
    pub fn interpolation_classes() -> Self {
        Self::from_static(INTERPOLATION_LITHOLOGIES)
    }

    fn from_static(labels: &[&str]) -> Self {
        let labels: Vec<String> = labels.iter().map(|l| l.to_string()).collect();
        let index = labels
            .iter()
            .enumerate()
            .map(|(i, l)| (l.clone(), i as u32))
            .collect();
        Self { labels, index }
    }

    fn rebuild_index(&mut self) -> Result<()> {
        self.index.clear();
        for (i, label) in self.labels.iter().enumerate() {
            if self.index.insert(label.clone(), i as u32).is_some() {
                return Err(BoreSliceError::Validation(format!(
                    "duplicate lithology label '{}' in vocabulary",
                    label
                )));
            }
        }
        Ok(())
    }

    /// Number of classes.
    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns true if the vocabulary has no classes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Class number of `label`, `None` if the label is not in the vocabulary.
    #[inline]
    pub fn class_number(&self, label: &str) -> Option<u32> {
        self.index.get(label).copied()
    }

    /// Elementwise [`class_number`](Self::class_number).
    pub fn class_numbers<S: AsRef<str>>(&self, labels: &[S]) -> Vec<Option<u32>> {
        labels.iter().map(|l| self.class_number(l.as_ref())).collect()
    }

    /// Label of class `number`.
    pub fn label(&self, number: u32) -> Option<&str> {
        self.labels.get(number as usize).map(String::as_str)
    }

    /// Labels in class-number order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Iterates over (class number, label) pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.labels
            .iter()
            .enumerate()
            .map(|(i, l)| (i as u32, l.as_str()))
    }
}

impl TryFrom<Vec<String>> for LithologyVocabulary {
    type Error = BoreSliceError;

    fn try_from(labels: Vec<String>) -> Result<Self> {
        Self::new(&labels)
    }
}

impl From<LithologyVocabulary> for Vec<String> {
    fn from(vocabulary: LithologyVocabulary) -> Self {
        vocabulary.labels
    }
}

impl Default for LithologyVocabulary {
    fn default() -> Self {
        Self::default_lithologies()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_numbers_follow_order() {
        let vocabulary = LithologyVocabulary::interpolation_classes();
        assert_eq!(vocabulary.len(), 7);
        assert_eq!(vocabulary.class_number("sand"), Some(0));
        assert_eq!(vocabulary.class_number("basalt"), Some(5));
        assert_eq!(vocabulary.class_number("coffee"), Some(6));
        assert_eq!(vocabulary.label(2), Some("clay"));
    }

    #[test]
    fn test_unknown_label() {
        let vocabulary = LithologyVocabulary::default();
        assert_eq!(vocabulary.class_number("basalt"), None);
        assert_eq!(vocabulary.class_number(""), None);
        assert_eq!(vocabulary.label(99), None);
    }

    #[test]
    fn test_vectorized_lookup() {
        let vocabulary = LithologyVocabulary::new(&["clay", "sand"]).unwrap();
        let numbers = vocabulary.class_numbers(&["sand", "", "clay", "gravel"]);
        assert_eq!(numbers, vec![Some(1), None, Some(0), None]);
    }

    #[test]
    fn test_duplicates_rejected() {
        let result = LithologyVocabulary::new(&["clay", "sand", "clay"]);
        assert!(matches!(result, Err(BoreSliceError::Validation(_))));
    }

    #[test]
    fn test_bijection() {
        let vocabulary = LithologyVocabulary::default();
        for (number, label) in vocabulary.iter() {
            assert_eq!(vocabulary.class_number(label), Some(number));
        }
    }
}
