//! Description -> lithology classification pipeline.

use crate::borelog::BoreLogTable;
use crate::lexicon::{
    find_primary_lithology, find_secondary_lithology, AdjectiveLexiconDict, LexiconDict,
    LithologyVocabulary,
};
use crate::text::{AbbreviationExpander, NoExpansion, Normalizer, UnicodeTokenizer, WordTokenizer};
use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Lithologies found in one description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Primary lithology, empty if none matched.
    pub primary: String,
    /// Secondary lithology, empty if none matched.
    pub secondary: String,
    /// Class number of the primary lithology in the vocabulary.
    pub primary_class: Option<u32>,
    /// Class number of the secondary lithology in the vocabulary.
    pub secondary_class: Option<u32>,
}

/// Normalizer, tokenizer, lexicons and vocabulary bundled together.
pub struct DescriptionClassifier {
    normalizer: Normalizer,
    tokenizer: Box<dyn WordTokenizer>,
    expander: Box<dyn AbbreviationExpander>,
    lithologies: LexiconDict,
    adjectives: AdjectiveLexiconDict,
    vocabulary: LithologyVocabulary,
}

impl DescriptionClassifier {
    /// Creates a classifier from explicit lexicons and vocabulary.
    ///
    /// Uses the Unicode tokenizer and no abbreviation expansion; see
    /// [`with_tokenizer`](Self::with_tokenizer) and
    /// [`with_expander`](Self::with_expander).
    pub fn new(
        normalizer: Normalizer,
        lithologies: LexiconDict,
        adjectives: AdjectiveLexiconDict,
        vocabulary: LithologyVocabulary,
    ) -> Self {
        Self {
            normalizer,
            tokenizer: Box::new(UnicodeTokenizer::new()),
            expander: Box::new(NoExpansion),
            lithologies,
            adjectives,
            vocabulary,
        }
    }

    /// Replaces the tokenizer.
    pub fn with_tokenizer<T: WordTokenizer + 'static>(mut self, tokenizer: T) -> Self {
        self.tokenizer = Box::new(tokenizer);
        self
    }

    /// Replaces the abbreviation expander.
    pub fn with_expander<E: AbbreviationExpander + 'static>(mut self, expander: E) -> Self {
        self.expander = Box::new(expander);
        self
    }

    /// Vocabulary used for class numbers.
    pub fn vocabulary(&self) -> &LithologyVocabulary {
        &self.vocabulary
    }

    /// Normalized tokens of one description.
    pub fn tokens(&self, description: &str) -> Vec<String> {
        let normalized = self.normalizer.normalize(description, self.expander.as_ref());
        self.tokenizer.tokenize(&normalized)
    }

    /// Classifies one description.
    pub fn classify(&self, description: &str) -> Classification {
        let tokens = self.tokens(description);
        let primary = find_primary_lithology(&tokens, &self.lithologies);
        let secondary =
            find_secondary_lithology(&tokens, &primary, &self.adjectives, &self.lithologies);
        Classification {
            primary_class: self.vocabulary.class_number(&primary),
            secondary_class: self.vocabulary.class_number(&secondary),
            primary,
            secondary,
        }
    }

    /// Classifies descriptions elementwise, preserving order and count.
    pub fn classify_all<S: AsRef<str> + Sync>(&self, descriptions: &[S]) -> Vec<Classification> {
        descriptions
            .par_iter()
            .map(|d| self.classify(d.as_ref()))
            .collect()
    }

    /// Fills the label and class columns of every row from its description.
    ///
    /// Returns the number of rows that received a primary lithology.
    pub fn label_table(&self, table: &mut BoreLogTable) -> usize {
        let classifications = self.classify_all(&table.descriptions());
        let mut labelled = 0;

        for (record, c) in table.records_mut().iter_mut().zip(classifications) {
            if !c.primary.is_empty() {
                labelled += 1;
            }
            if !c.primary.is_empty() && c.primary_class.is_none() {
                debug!("Primary lithology '{}' is not in the vocabulary", c.primary);
            }
            record.primary_lithology = c.primary;
            record.primary_class = c.primary_class;
            record.secondary_lithology = c.secondary;
            record.secondary_class = c.secondary_class;
        }

        info!("Classified {} of {} bore-log intervals", labelled, table.len());
        labelled
    }
}

impl Default for DescriptionClassifier {
    fn default() -> Self {
        Self::new(
            Normalizer::default_config(),
            LexiconDict::default(),
            AdjectiveLexiconDict::default(),
            LithologyVocabulary::default(),
        )
    }
}

impl std::fmt::Debug for DescriptionClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DescriptionClassifier")
            .field("normalizer", &self.normalizer)
            .field("lithologies", &self.lithologies.len())
            .field("adjectives", &self.adjectives.len())
            .field("vocabulary", &self.vocabulary.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::borelog::BoreLogRecord;
    use crate::text::AbbreviationMap;

    #[test]
    fn test_classify_description() {
        let classifier = DescriptionClassifier::default();
        let c = classifier.classify("Sandy CLAY, some gravel");
        assert_eq!(c.primary, "clay");
        assert_eq!(c.secondary, "sand");
        assert_eq!(c.primary_class, Some(2));
        assert_eq!(c.secondary_class, Some(0));
    }

    #[test]
    fn test_composite_term_is_split() {
        let classifier = DescriptionClassifier::default();
        let c = classifier.classify("SANDWITHCLAY");
        assert_eq!(c.primary, "sand");
        assert_eq!(c.secondary, "clay");
    }

    #[test]
    fn test_no_lithology() {
        let classifier = DescriptionClassifier::default();
        let c = classifier.classify("no sample recovered");
        assert_eq!(c, Classification::default());
    }

    #[test]
    fn test_expander_applied() {
        let mut abbreviations = AbbreviationMap::default();
        abbreviations.insert("CL", "clay");
        let classifier = DescriptionClassifier::default().with_expander(abbreviations);
        assert_eq!(classifier.classify("CL, grey").primary, "clay");
    }

    #[test]
    fn test_label_table() {
        let mut table = BoreLogTable::new(vec![
            BoreLogRecord::new(0.0, 0.0, 5.0, 0.0, "Topsoil"),
            BoreLogRecord::new(0.0, 0.0, 0.0, -4.0, "Basalt, fractured"),
            BoreLogRecord::new(0.0, 0.0, -4.0, -9.0, "silty SAND"),
        ])
        .unwrap();

        let classifier = DescriptionClassifier::default();
        let labelled = classifier.label_table(&mut table);
        assert_eq!(labelled, 2);

        let rows = table.records();
        assert_eq!(rows[0].primary_lithology, "soil");
        assert_eq!(rows[0].primary_class, Some(9));
        assert_eq!(rows[1].primary_lithology, "");
        assert_eq!(rows[1].primary_class, None);
        assert_eq!(rows[2].primary_lithology, "sand");
        assert_eq!(rows[2].secondary_lithology, "silt");
    }
}
