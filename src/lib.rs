//! # Boreslice - Bore-Log Lithology Interpolation
//!
//! Boreslice turns free-text bore-log descriptions into lithology classes and
//! interpolates those classes between boreholes into 2D slices and 3D
//! volumes.
//!
//! ## Overview
//!
//! A bore log records, for each depth interval of a borehole, a description
//! such as "brown SANDWITHCLAY, fine grained". Descriptions are normalized,
//! tokenized and matched against lithology lexicons to find a primary and a
//! secondary lithology. Labelled intervals crossing a given elevation then
//! train a k-nearest-neighbour classifier that is evaluated over a regular
//! mesh. Stacking slices at successive elevations yields a volume.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use boreslice::{BoreLogTable, DescriptionClassifier, Mesh, VolumeBuilder};
//!
//! let mut table = BoreLogTable::from_json_reader(File::open("bores.json")?)?;
//! DescriptionClassifier::default().label_table(&mut table);
//!
//! let mesh = Mesh::from_axes(&[0.0, 100.0, 200.0], &[0.0, 100.0]);
//! let volume = VolumeBuilder::default().build_label_volume(&table, &[10.0, 0.0, -10.0], 10, &mesh);
//! ```
//!
//! ## Architecture
//!
//! - [`text`] - Normalization, abbreviation expansion and tokenization
//! - [`lexicon`] - Lithology lexicons, vocabulary and description classification
//! - [`borelog`] - Bore-log records and depth slicing
//! - [`spatial`] - Meshes, k-NN classification and class balancing
//! - [`volume`] - Volume assembly and single-class extraction
//! - [`storage`] - Binary format for volumes
//!
//! Cells that could not be predicted hold [`NO_DATA`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod borelog;
pub mod config;
pub mod error;
pub mod lexicon;
pub mod spatial;
pub mod storage;
pub mod text;
pub mod volume;

// Re-export commonly used types
pub use borelog::{observations_for_depth, slice_at_depth, BoreLogRecord, BoreLogTable, LithologyColumn};
pub use config::{Config, InterpolationConfig, TextConfig, Weighting};
pub use error::{BoreSliceError, Result};
pub use lexicon::{
    find_primary_lithologies, find_primary_lithology, find_secondary_lithologies,
    find_secondary_lithology, AdjectiveLexiconDict, Classification, DescriptionClassifier,
    LexiconDict, LithologyVocabulary,
};
pub use spatial::{
    is_no_data, BoundingBox, ClassBalancer, Classifier, KNeighborsClassifier, Mesh,
    SpatialClassifier, TrainingSet, NO_DATA,
};
pub use storage::{VolumeFile, VolumeHeader, VolumeKind};
pub use text::{AbbreviationExpander, AbbreviationMap, Normalizer, UnicodeTokenizer, WordTokenizer};
pub use volume::{extract_single_class_volume, VolumeBuilder};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
