//! Selection of bore-log intervals crossing a given elevation.

use crate::borelog::{BoreLogRecord, BoreLogTable, LithologyColumn};
use ndarray::Array1;

/// Rows whose interval contains `elevation`, in table order.
///
/// A row is kept when `depth_from_ahd >= elevation` and
/// `depth_to_ahd <= elevation`: with AHD elevations the "from" bound is the
/// upper one, so this is a closed containment test.
pub fn slice_at_depth(table: &BoreLogTable, elevation: f64) -> Vec<&BoreLogRecord> {
    table.iter().filter(|r| r.spans(elevation)).collect()
}

/// Rows crossing `elevation` that carry a lithology label in `column`.
///
/// These are the training observations for the spatial classifier at that
/// elevation; unlabelled rows cannot contribute.
pub fn observations_for_depth(
    table: &BoreLogTable,
    elevation: f64,
    column: LithologyColumn,
) -> Vec<&BoreLogRecord> {
    table
        .iter()
        .filter(|r| r.spans(elevation) && !r.lithology(column).is_empty())
        .collect()
}

/// Columnar view of positions, intervals and primary class numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassColumns {
    /// Eastings.
    pub easting: Array1<f64>,
    /// Northings.
    pub northing: Array1<f64>,
    /// Interval tops (AHD).
    pub depth_from_ahd: Array1<f64>,
    /// Interval bottoms (AHD).
    pub depth_to_ahd: Array1<f64>,
    /// Primary class numbers; `None` where unresolved.
    pub class: Vec<Option<u32>>,
}

/// Extracts easting, northing, interval bounds and primary class numbers.
pub fn class_columns<'a, I>(records: I) -> ClassColumns
where
    I: IntoIterator<Item = &'a BoreLogRecord>,
{
    let records: Vec<&BoreLogRecord> = records.into_iter().collect();
    ClassColumns {
        easting: records.iter().map(|r| r.easting).collect(),
        northing: records.iter().map(|r| r.northing).collect(),
        depth_from_ahd: records.iter().map(|r| r.depth_from_ahd).collect(),
        depth_to_ahd: records.iter().map(|r| r.depth_to_ahd).collect(),
        class: records.iter().map(|r| r.primary_class).collect(),
    }
}
