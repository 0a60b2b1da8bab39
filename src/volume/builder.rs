//! Slice-by-slice assembly of label and probability volumes.

use crate::borelog::BoreLogTable;
use crate::config::InterpolationConfig;
use crate::error::{BoreSliceError, Result};
use crate::lexicon::LithologyVocabulary;
use crate::spatial::{is_no_data, ClassBalancer, Mesh, SpatialClassifier, NO_DATA};
use log::{info, warn};
use ndarray::{s, Array2, Array3};

/// Volume shape implied by a mesh and an elevation count.
pub fn expected_shape(mesh: &Mesh, n_elevations: usize) -> (usize, usize, usize) {
    let (nx, ny) = mesh.shape();
    (nx, ny, n_elevations)
}

fn check_shape(actual: (usize, usize, usize), expected: (usize, usize, usize)) -> Result<()> {
    if actual != expected {
        return Err(BoreSliceError::ShapeMismatch {
            expected: vec![expected.0, expected.1, expected.2],
            actual: vec![actual.0, actual.1, actual.2],
        });
    }
    Ok(())
}

/// True for a grid the classifier could not fill.
fn is_empty_slice(grid: &Array2<f64>) -> bool {
    !grid.is_empty() && grid.iter().all(|v| is_no_data(*v))
}

fn report_empty_slices(empty: usize, total: usize, n_neighbors: usize) {
    if empty > 0 {
        warn!(
            "{} of {} slices have fewer than {} labelled observations and hold no data",
            empty, total, n_neighbors
        );
    }
}

type SliceCallback = Box<dyn Fn(usize, f64) + Send + Sync>;

/// Builds 3D volumes by interpolating one elevation slice at a time.
pub struct VolumeBuilder {
    classifier: SpatialClassifier,
    on_slice: Option<SliceCallback>,
}

impl VolumeBuilder {
    /// Creates a builder from the interpolation configuration.
    pub fn new(config: &InterpolationConfig) -> Self {
        Self::with_classifier(SpatialClassifier::new(config))
    }

    /// Creates a builder around an existing spatial classifier.
    pub fn with_classifier(classifier: SpatialClassifier) -> Self {
        Self {
            classifier,
            on_slice: None,
        }
    }

    /// Calls `f(z_index, elevation)` after each slice is written.
    pub fn on_slice<F>(mut self, f: F) -> Self
    where
        F: Fn(usize, f64) + Send + Sync + 'static,
    {
        self.on_slice = Some(Box::new(f));
        self
    }

    /// The classifier used for each slice.
    pub fn classifier(&self) -> &SpatialClassifier {
        &self.classifier
    }

    fn slice_done(&self, z: usize, elevation: f64) {
        if let Some(f) = &self.on_slice {
            f(z, elevation);
        }
    }

    /// Predicted class numbers for every mesh cell and elevation.
    ///
    /// Slices with too few observations are [`NO_DATA`].
    pub fn build_label_volume(
        &self,
        table: &BoreLogTable,
        elevations: &[f64],
        n_neighbors: usize,
        mesh: &Mesh,
    ) -> Array3<f64> {
        let mut volume = Array3::from_elem(expected_shape(mesh, elevations.len()), NO_DATA);
        self.fill_label_volume(&mut volume, table, elevations, n_neighbors, mesh);
        volume
    }

    /// Writes predicted class numbers into a caller-supplied volume.
    ///
    /// Fails without touching `volume` if its shape is not
    /// (mesh x, mesh y, number of elevations).
    pub fn interpolate_into(
        &self,
        volume: &mut Array3<f64>,
        table: &BoreLogTable,
        elevations: &[f64],
        n_neighbors: usize,
        mesh: &Mesh,
    ) -> Result<()> {
        check_shape(volume.dim(), expected_shape(mesh, elevations.len()))?;
        self.fill_label_volume(volume, table, elevations, n_neighbors, mesh);
        Ok(())
    }

    /// Returns the number of slices left as [`NO_DATA`].
    fn fill_label_volume(
        &self,
        volume: &mut Array3<f64>,
        table: &BoreLogTable,
        elevations: &[f64],
        n_neighbors: usize,
        mesh: &Mesh,
    ) -> usize {
        info!(
            "Interpolating {} slices over a {:?} mesh",
            elevations.len(),
            mesh.shape()
        );
        let mut empty = 0;
        for (z, &elevation) in elevations.iter().enumerate() {
            let surface = self
                .classifier
                .interpolate_slice(table, elevation, n_neighbors, mesh);
            if is_empty_slice(&surface) {
                empty += 1;
            }
            volume.slice_mut(s![.., .., z]).assign(&surface);
            self.slice_done(z, elevation);
        }
        report_empty_slices(empty, elevations.len(), n_neighbors);
        empty
    }

    /// One probability volume per vocabulary class.
    ///
    /// Class `i`'s volume at z-slice `j` holds the probability of class `i` at
    /// `elevations[j]`. Every slice is fitted on a training set padded with
    /// one anchor per class, so every slice reports all classes. Observed
    /// class numbers outside the vocabulary get no volume; their share of
    /// the probability is dropped, so such cells sum to less than one.
    pub fn build_class_probability_volumes(
        &self,
        vocabulary: &LithologyVocabulary,
        shape: (usize, usize, usize),
        table: &BoreLogTable,
        elevations: &[f64],
        n_neighbors: usize,
        mesh: &Mesh,
    ) -> Result<Vec<Array3<f64>>> {
        check_shape(shape, expected_shape(mesh, elevations.len()))?;

        let n_classes = vocabulary.len();
        let balancer = ClassBalancer::for_vocabulary(vocabulary);
        let mut volumes: Vec<Array3<f64>> = (0..n_classes)
            .map(|_| Array3::from_elem(shape, NO_DATA))
            .collect();

        info!(
            "Estimating {} class probabilities over {} slices",
            n_classes,
            elevations.len()
        );
        let mut empty = 0;
        for (z, &elevation) in elevations.iter().enumerate() {
            let probs = self.classifier.class_probabilities_at_depth(
                table,
                elevation,
                n_neighbors,
                mesh,
                Some(&balancer),
            );
            if probs.len() != n_classes {
                warn!(
                    "Slice at {} reports {} classes for a vocabulary of {}; extra classes dropped",
                    elevation,
                    probs.len(),
                    n_classes
                );
            }
            if probs.first().map_or(false, is_empty_slice) {
                empty += 1;
            }
            for (volume, grid) in volumes.iter_mut().zip(probs.iter()) {
                volume.slice_mut(s![.., .., z]).assign(grid);
            }
            self.slice_done(z, elevation);
        }
        report_empty_slices(empty, elevations.len(), n_neighbors);

        Ok(volumes)
    }
}

impl Default for VolumeBuilder {
    fn default() -> Self {
        Self::new(&InterpolationConfig::default())
    }
}

impl std::fmt::Debug for VolumeBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VolumeBuilder")
            .field("classifier", &self.classifier)
            .field("on_slice", &self.on_slice.is_some())
            .finish()
    }
}
