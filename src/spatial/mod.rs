//! Spatial classification of lithology over 2D meshes.
//!
//! - [`Mesh`] holds the grid of (easting, northing) sample points
//! - [`KNeighborsClassifier`] is the distance-weighted k-NN learner
//! - [`ClassBalancer`] pads training sets so every class is always reported
//! - [`SpatialClassifier`] ties them to bore-log slices
//!
//! Cells without a prediction hold [`NO_DATA`].

mod balancer;
mod classifier;
mod knn;
mod mesh;
mod training;

pub use balancer::{pad_training_set, ClassBalancer, PADDING_COORDINATE};
pub use classifier::SpatialClassifier;
pub use knn::{Classifier, KNeighborsClassifier, KnnModel};
pub use mesh::{BoundingBox, Mesh};
pub use training::TrainingSet;

/// "No data" marker in prediction grids and volumes.
///
/// NaN never compares equal, so test with [`is_no_data`] rather than `==`.
pub const NO_DATA: f64 = f64::NAN;

/// Returns true if `value` is the [`NO_DATA`] marker.
#[inline]
pub fn is_no_data(value: f64) -> bool {
    value.is_nan()
}
