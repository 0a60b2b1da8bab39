//! Binary format for interpolated volumes.
//!
//! ## Format Layout
//!
//! ```text
//! +------------------+
//! | Magic (4 bytes)  |  "BSVL"
//! +------------------+
//! | Version (2 bytes)|  little endian
//! +------------------+
//! | Header (bincode) |
//! +------------------+
//! | Volumes (bincode)|
//! +------------------+
//! ```
//!
//! The format carries no compatibility guarantee across versions.

use crate::error::{BoreSliceError, Result};
use ndarray::Array3;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Magic number for volume files.
const MAGIC: &[u8; 4] = b"BSVL";

/// Current format version.
const VERSION: u16 = 1;

/// What the stored volumes hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolumeKind {
    /// One volume of predicted class numbers.
    Labels,
    /// One probability volume per class.
    Probabilities,
}

/// Description of the stored volumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeHeader {
    /// What the volumes hold.
    pub kind: VolumeKind,
    /// Volume shape (x, y, z).
    pub shape: (usize, usize, usize),
    /// Elevation of each z-slice.
    pub elevations: Vec<f64>,
    /// Class labels in class-number order.
    pub class_labels: Vec<String>,
}

/// Volumes with their header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeFile {
    /// Header.
    pub header: VolumeHeader,
    /// The volumes, all of `header.shape`.
    pub volumes: Vec<Array3<f64>>,
}

impl VolumeFile {
    /// Bundles volumes with their header, checking every shape.
    pub fn new(header: VolumeHeader, volumes: Vec<Array3<f64>>) -> Result<Self> {
        let (nx, ny, nz) = header.shape;
        if nz != header.elevations.len() {
            return Err(BoreSliceError::Validation(format!(
                "{} z-slices but {} elevations",
                nz,
                header.elevations.len()
            )));
        }
        for volume in &volumes {
            if volume.dim() != header.shape {
                return Err(BoreSliceError::ShapeMismatch {
                    expected: vec![nx, ny, nz],
                    actual: volume.shape().to_vec(),
                });
            }
        }
        Ok(Self { header, volumes })
    }

    /// Writes the file to `writer`.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        writer.write_all(MAGIC)?;
        writer.write_all(&VERSION.to_le_bytes())?;
        bincode::serialize_into(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    /// Reads a file from `reader`.
    pub fn read_from<R: Read>(mut reader: R) -> Result<Self> {
        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic)?;
        if &magic != MAGIC {
            return Err(BoreSliceError::InvalidVolumeFormat(
                "Invalid magic number".to_string(),
            ));
        }

        let mut version = [0u8; 2];
        reader.read_exact(&mut version)?;
        let version = u16::from_le_bytes(version);
        if version != VERSION {
            return Err(BoreSliceError::InvalidVolumeFormat(format!(
                "Unsupported version: {}",
                version
            )));
        }

        let file: VolumeFile = bincode::deserialize_from(&mut reader)?;
        Self::new(file.header, file.volumes)
    }

    /// Saves to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        self.write_to(BufWriter::new(file))
    }

    /// Loads from a file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::read_from(BufReader::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::{is_no_data, NO_DATA};
    use tempfile::tempdir;

    fn label_file() -> VolumeFile {
        let mut volume = Array3::from_elem((2, 3, 2), 1.0);
        volume[[0, 1, 1]] = NO_DATA;
        let header = VolumeHeader {
            kind: VolumeKind::Labels,
            shape: (2, 3, 2),
            elevations: vec![10.0, 5.0],
            class_labels: vec!["sand".to_string(), "clay".to_string()],
        };
        VolumeFile::new(header, vec![volume]).unwrap()
    }

    #[test]
    fn test_save_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("labels.bsvl");

        let file = label_file();
        file.save(&path).unwrap();
        let loaded = VolumeFile::load(&path).unwrap();

        assert_eq!(loaded.header, file.header);
        assert_eq!(loaded.volumes[0][[1, 2, 0]], 1.0);
        assert!(is_no_data(loaded.volumes[0][[0, 1, 1]]));
    }

    #[test]
    fn test_bad_magic() {
        let bytes = b"NOPE\x01\x00".to_vec();
        let result = VolumeFile::read_from(bytes.as_slice());
        assert!(matches!(result, Err(BoreSliceError::InvalidVolumeFormat(_))));
    }

    #[test]
    fn test_shape_checked() {
        let header = VolumeHeader {
            kind: VolumeKind::Probabilities,
            shape: (2, 2, 1),
            elevations: vec![0.0],
            class_labels: vec!["sand".to_string()],
        };
        let result = VolumeFile::new(header, vec![Array3::zeros((2, 2, 2))]);
        assert!(matches!(result, Err(BoreSliceError::ShapeMismatch { .. })));
    }
}
