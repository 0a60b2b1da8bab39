//! Weighted k-nearest-neighbour classification in the plane.

use crate::config::Weighting;
use crate::error::{BoreSliceError, Result};
use crate::spatial::TrainingSet;

/// A fitted classifier over (easting, northing) points.
pub trait Classifier: Send + Sync {
    /// Class numbers the classifier can report, sorted ascending.
    fn classes(&self) -> &[u32];

    /// Probability of each class of [`classes`](Self::classes) at `point`.
    fn predict_proba_point(&self, point: [f64; 2]) -> Vec<f64>;

    /// Most probable class at `point`; ties go to the smallest class number.
    fn predict_point(&self, point: [f64; 2]) -> u32 {
        let proba = self.predict_proba_point(point);
        let mut best = 0;
        for (i, p) in proba.iter().enumerate() {
            if *p > proba[best] {
                best = i;
            }
        }
        self.classes()[best]
    }
}

/// k-nearest-neighbour classifier configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KNeighborsClassifier {
    n_neighbors: usize,
    weighting: Weighting,
}

impl KNeighborsClassifier {
    /// Creates a classifier voting over `n_neighbors` neighbours.
    pub fn new(n_neighbors: usize, weighting: Weighting) -> Self {
        Self {
            n_neighbors,
            weighting,
        }
    }

    /// Inverse-distance weighted classifier.
    pub fn distance_weighted(n_neighbors: usize) -> Self {
        Self::new(n_neighbors, Weighting::Distance)
    }

    /// Fits the classifier to a training set.
    ///
    /// Fails when fewer than `n_neighbors` observations are available or when
    /// `n_neighbors` is zero.
    pub fn fit(&self, training: TrainingSet) -> Result<KnnModel> {
        if self.n_neighbors == 0 {
            return Err(BoreSliceError::Validation(
                "n_neighbors must be at least 1".to_string(),
            ));
        }
        if training.len() < self.n_neighbors {
            return Err(BoreSliceError::InsufficientSamples {
                requested: self.n_neighbors,
                available: training.len(),
            });
        }

        let classes = training.classes();
        let class_index = training
            .targets
            .iter()
            .map(|t| classes.binary_search(t).unwrap_or_default())
            .collect();

        Ok(KnnModel {
            features: training.features,
            class_index,
            classes,
            n_neighbors: self.n_neighbors,
            weighting: self.weighting,
        })
    }
}

/// A k-NN classifier fitted to a training set.
#[derive(Debug, Clone)]
pub struct KnnModel {
    features: Vec<[f64; 2]>,
    /// Position of each training target in `classes`.
    class_index: Vec<usize>,
    classes: Vec<u32>,
    n_neighbors: usize,
    weighting: Weighting,
}

impl KnnModel {
    /// Number of training observations.
    pub fn n_samples(&self) -> usize {
        self.features.len()
    }

    /// The `n_neighbors` nearest training points as (distance, index), nearest
    /// first; equal distances keep training order.
    pub fn neighbors(&self, point: [f64; 2]) -> Vec<(f64, usize)> {
        let mut distances: Vec<(f64, usize)> = self
            .features
            .iter()
            .enumerate()
            .map(|(i, f)| ((f[0] - point[0]).hypot(f[1] - point[1]), i))
            .collect();

        let by_distance =
            |a: &(f64, usize), b: &(f64, usize)| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1));

        let k = self.n_neighbors.min(distances.len());
        if k < distances.len() {
            distances.select_nth_unstable_by(k, by_distance);
            distances.truncate(k);
        }
        distances.sort_by(by_distance);
        distances
    }

    fn votes(&self, neighbors: &[(f64, usize)]) -> Vec<f64> {
        let mut votes = vec![0.0; self.classes.len()];
        match self.weighting {
            Weighting::Uniform => {
                for &(_, i) in neighbors {
                    votes[self.class_index[i]] += 1.0;
                }
            }
            Weighting::Distance => {
                // Exact hits take the whole vote
                let exact = neighbors.iter().any(|(d, _)| *d == 0.0);
                for &(d, i) in neighbors {
                    let w = if exact {
                        if d == 0.0 { 1.0 } else { 0.0 }
                    } else {
                        1.0 / d
                    };
                    votes[self.class_index[i]] += w;
                }
            }
        }
        votes
    }
}

impl Classifier for KnnModel {
    fn classes(&self) -> &[u32] {
        &self.classes
    }

    fn predict_proba_point(&self, point: [f64; 2]) -> Vec<f64> {
        let mut votes = self.votes(&self.neighbors(point));
        let total: f64 = votes.iter().sum();
        if total > 0.0 {
            for v in &mut votes {
                *v /= total;
            }
        }
        votes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_clusters() -> TrainingSet {
        let mut set = TrainingSet::new();
        set.push([0.0, 0.0], 3);
        set.push([1.0, 0.0], 3);
        set.push([0.0, 1.0], 3);
        set.push([10.0, 10.0], 1);
        set.push([11.0, 10.0], 1);
        set
    }

    #[test]
    fn test_insufficient_samples() {
        let result = KNeighborsClassifier::distance_weighted(6).fit(two_clusters());
        assert!(matches!(
            result,
            Err(BoreSliceError::InsufficientSamples { requested: 6, available: 5 })
        ));
        assert!(KNeighborsClassifier::distance_weighted(0).fit(two_clusters()).is_err());
    }

    #[test]
    fn test_classes_sorted() {
        let model = KNeighborsClassifier::distance_weighted(3).fit(two_clusters()).unwrap();
        assert_eq!(model.classes(), &[1, 3]);
        assert_eq!(model.n_samples(), 5);
    }

    #[test]
    fn test_predict_nearest_cluster() {
        let model = KNeighborsClassifier::distance_weighted(3).fit(two_clusters()).unwrap();
        assert_eq!(model.predict_point([0.5, 0.5]), 3);
        assert_eq!(model.predict_point([10.5, 9.0]), 1);
    }

    #[test]
    fn test_distance_weighting_beats_majority() {
        let mut set = TrainingSet::new();
        set.push([0.0, 0.0], 0);
        set.push([10.0, 0.0], 1);
        set.push([11.0, 0.0], 1);
        let query = [1.0, 0.0];

        let uniform = KNeighborsClassifier::new(3, Weighting::Uniform).fit(set.clone()).unwrap();
        assert_eq!(uniform.predict_point(query), 1);

        let weighted = KNeighborsClassifier::distance_weighted(3).fit(set).unwrap();
        // weights 1, 1/9, 1/10
        assert_eq!(weighted.predict_point(query), 0);
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let model = KNeighborsClassifier::distance_weighted(5).fit(two_clusters()).unwrap();
        let proba = model.predict_proba_point([3.0, 4.0]);
        assert_eq!(proba.len(), 2);
        assert!((proba.iter().sum::<f64>() - 1.0).abs() < 1e-10);
        assert!(proba[1] > proba[0]);
    }

    #[test]
    fn test_exact_hit_takes_all() {
        let model = KNeighborsClassifier::distance_weighted(5).fit(two_clusters()).unwrap();
        let proba = model.predict_proba_point([10.0, 10.0]);
        assert_eq!(proba, vec![1.0, 0.0]);
    }

    #[test]
    fn test_neighbors_order() {
        let model = KNeighborsClassifier::distance_weighted(2).fit(two_clusters()).unwrap();
        let neighbors = model.neighbors([0.0, 0.0]);
        assert_eq!(neighbors.len(), 2);
        assert_eq!(neighbors[0], (0.0, 0));
        // (1, 0) and (0, 1) are equally far; training order decides
        assert_eq!(neighbors[1], (1.0, 1));
    }
}
