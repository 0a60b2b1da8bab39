//! Synthetic anchor observations guaranteeing full class coverage.
//!
//! A classifier only reports probabilities for the classes it saw while
//! fitting, and the set of classes crossing a given elevation changes from
//! slice to slice. Padding every slice's training set with one observation
//! per vocabulary class keeps the probability output at a fixed width, in
//! vocabulary order, so slices can be stacked into volumes.
//!
//! The anchors all sit at [`PADDING_COORDINATE`]. With inverse-distance
//! weighting their influence decays with distance from that point but never
//! reaches zero.

use crate::lexicon::LithologyVocabulary;
use crate::spatial::TrainingSet;

/// Where the synthetic anchors are placed.
pub const PADDING_COORDINATE: [f64; 2] = [0.0, 0.0];

/// Pads training sets with one anchor per class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassBalancer {
    n_classes: usize,
}

impl ClassBalancer {
    /// Balancer for classes `0..n_classes`.
    pub fn new(n_classes: usize) -> Self {
        Self { n_classes }
    }

    /// Balancer covering every class of `vocabulary`.
    pub fn for_vocabulary(vocabulary: &LithologyVocabulary) -> Self {
        Self::new(vocabulary.len())
    }

    /// Number of classes guaranteed after padding.
    #[inline]
    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Appends anchors with targets `0..n_classes`, in order.
    pub fn pad(&self, mut training: TrainingSet) -> TrainingSet {
        training.features.reserve(self.n_classes);
        training.targets.reserve(self.n_classes);
        for class in 0..self.n_classes {
            training.push(PADDING_COORDINATE, class as u32);
        }
        training
    }
}

/// Returns a transform padding training sets for `vocabulary`.
pub fn pad_training_set(vocabulary: &LithologyVocabulary) -> impl Fn(TrainingSet) -> TrainingSet {
    let balancer = ClassBalancer::for_vocabulary(vocabulary);
    move |training| balancer.pad(training)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_class_present() {
        let vocabulary = LithologyVocabulary::interpolation_classes();
        let mut training = TrainingSet::new();
        training.push([500.0, 600.0], 2);
        training.push([510.0, 600.0], 2);

        let padded = pad_training_set(&vocabulary)(training);
        assert_eq!(padded.len(), 2 + vocabulary.len());
        assert_eq!(padded.classes(), (0..vocabulary.len() as u32).collect::<Vec<_>>());
    }

    #[test]
    fn test_anchors_appended_in_order() {
        let padded = ClassBalancer::new(3).pad(TrainingSet::new());
        assert_eq!(padded.targets, vec![0, 1, 2]);
        assert!(padded.features.iter().all(|f| *f == PADDING_COORDINATE));
    }

    #[test]
    fn test_original_rows_untouched() {
        let mut training = TrainingSet::new();
        training.push([1.0, 2.0], 5);
        let padded = ClassBalancer::new(2).pad(training);
        assert_eq!(padded.features[0], [1.0, 2.0]);
        assert_eq!(padded.targets[0], 5);
    }
}
