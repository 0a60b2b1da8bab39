//! Bore-log tables and depth slicing.

mod record;
mod slice;

pub use record::{BoreLogRecord, BoreLogTable, LithologyColumn};
pub use slice::{class_columns, observations_for_depth, slice_at_depth, ClassColumns};
