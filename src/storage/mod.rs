//! Binary storage of interpolated volumes.

mod format;

pub use format::{VolumeFile, VolumeHeader, VolumeKind};
