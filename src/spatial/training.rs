//! (easting, northing) -> class number training sets.

use crate::borelog::{BoreLogRecord, LithologyColumn};
use log::debug;

/// Feature/target pairs for a spatial classifier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainingSet {
    /// (easting, northing) of each observation.
    pub features: Vec<[f64; 2]>,
    /// Class number of each observation.
    pub targets: Vec<u32>,
}

impl TrainingSet {
    /// Creates an empty training set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a training set from primary class numbers.
    ///
    /// Observations without a class number are skipped.
    pub fn from_observations(observations: &[&BoreLogRecord]) -> Self {
        Self::from_column(observations, LithologyColumn::Primary)
    }

    /// Builds a training set from the class numbers of `column`.
    pub fn from_column(observations: &[&BoreLogRecord], column: LithologyColumn) -> Self {
        let mut set = Self::new();
        for record in observations {
            match record.class(column) {
                Some(class) => set.push([record.easting, record.northing], class),
                None => debug!(
                    "Skipping observation at ({}, {}) without class number",
                    record.easting, record.northing
                ),
            }
        }
        set
    }

    /// Appends one observation.
    pub fn push(&mut self, feature: [f64; 2], target: u32) {
        self.features.push(feature);
        self.targets.push(target);
    }

    /// Number of observations.
    #[inline]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Returns true if the set has no observations.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Distinct class numbers, sorted ascending.
    pub fn classes(&self) -> Vec<u32> {
        let mut classes = self.targets.clone();
        classes.sort_unstable();
        classes.dedup();
        classes
    }
}
