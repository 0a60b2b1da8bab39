//! Error types for bore-log classification and lithology interpolation.

use thiserror::Error;

/// The main error type for boreslice operations.
#[derive(Error, Debug)]
pub enum BoreSliceError {
    /// Invalid input, such as parallel sequences of different lengths.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A destination array or mesh does not have the expected shape.
    #[error("Shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        /// The shape implied by the other arguments.
        expected: Vec<usize>,
        /// The shape that was supplied.
        actual: Vec<usize>,
    },

    /// A bore-log interval whose top lies below its bottom.
    #[error("Invalid interval at row {index}: depth from {from} is below depth to {to}")]
    InvalidInterval {
        /// Row index in the table.
        index: usize,
        /// Elevation of the interval top (AHD).
        from: f64,
        /// Elevation of the interval bottom (AHD).
        to: f64,
    },

    /// Not enough training samples for the requested neighbour count.
    #[error("Insufficient samples: {requested} neighbours requested, {available} available")]
    InsufficientSamples {
        /// Requested neighbour count.
        requested: usize,
        /// Number of training samples.
        available: usize,
    },

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid regular expression.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid volume file.
    #[error("Invalid volume format: {0}")]
    InvalidVolumeFormat(String),
}

/// Result type alias for boreslice operations.
pub type Result<T> = std::result::Result<T, BoreSliceError>;

impl From<bincode::Error> for BoreSliceError {
    fn from(err: bincode::Error) -> Self {
        BoreSliceError::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for BoreSliceError {
    fn from(err: serde_json::Error) -> Self {
        BoreSliceError::Serialization(err.to_string())
    }
}
