//! Single-class volumes for iso-surface rendering.

use ndarray::{Array3, Axis};

/// Isolates one class of a label volume.
///
/// Cells equal to `class_value` keep it; every other cell, [`NO_DATA`]
/// included, becomes `class_value - 1`. The six boundary faces are then set
/// to `class_value - 1` whatever their prediction, so iso-surfaces drawn at
/// the class value are always closed. Boundary cells lose their true class.
///
/// [`NO_DATA`]: crate::spatial::NO_DATA
pub fn extract_single_class_volume(volume: &Array3<f64>, class_value: f64) -> Array3<f64> {
    let other = class_value - 1.0;
    let mut single = volume.mapv(|v| if v == class_value { v } else { other });

    for axis in 0..3 {
        let len = single.len_of(Axis(axis));
        if len == 0 {
            continue;
        }
        single.index_axis_mut(Axis(axis), 0).fill(other);
        single.index_axis_mut(Axis(axis), len - 1).fill(other);
    }

    single
}
