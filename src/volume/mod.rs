//! 3D lithology volumes built from stacked elevation slices.
//!
//! Volumes are `Array3<f64>` indexed (x, y, z): the first two axes follow the
//! mesh, the third follows the elevation sequence (index i <-> elevation i).

mod builder;
mod extract;

pub use builder::{expected_shape, VolumeBuilder};
pub use extract::extract_single_class_volume;
