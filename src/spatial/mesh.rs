//! Regular (easting, northing) grids.

use crate::error::{BoreSliceError, Result};
use ndarray::{Array2, Zip};
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in projected coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Minimum easting.
    pub min_x: f64,
    /// Minimum northing.
    pub min_y: f64,
    /// Maximum easting.
    pub max_x: f64,
    /// Maximum northing.
    pub max_y: f64,
}

impl BoundingBox {
    /// Creates a bounding box.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Smallest box holding every point, `None` for no points.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        points.into_iter().fold(None, |acc, (x, y)| {
            Some(match acc {
                None => Self::new(x, y, x, y),
                Some(b) => Self::new(b.min_x.min(x), b.min_y.min(y), b.max_x.max(x), b.max_y.max(y)),
            })
        })
    }
}

/// Number of samples of `start, start + step, ...` strictly below `stop`.
fn axis(start: f64, stop: f64, step: f64) -> Vec<f64> {
    let n = ((stop - start) / step).ceil().max(0.0) as usize;
    (0..n).map(|i| start + i as f64 * step).collect()
}

/// Pair of same-shaped coordinate arrays.
///
/// `xx[[i, j]]` and `yy[[i, j]]` are the easting and northing of grid cell
/// (i, j). The first axis runs along easting, the second along northing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MeshParts")]
pub struct Mesh {
    xx: Array2<f64>,
    yy: Array2<f64>,
}

/// Unchecked serialized form of a [`Mesh`].
#[derive(Deserialize)]
struct MeshParts {
    xx: Array2<f64>,
    yy: Array2<f64>,
}

impl TryFrom<MeshParts> for Mesh {
    type Error = BoreSliceError;

    fn try_from(parts: MeshParts) -> Result<Self> {
        Self::new(parts.xx, parts.yy)
    }
}

impl Mesh {
    /// Creates a mesh from coordinate arrays of the same shape.
    pub fn new(xx: Array2<f64>, yy: Array2<f64>) -> Result<Self> {
        if xx.shape() != yy.shape() {
            return Err(BoreSliceError::ShapeMismatch {
                expected: xx.shape().to_vec(),
                actual: yy.shape().to_vec(),
            });
        }
        Ok(Self { xx, yy })
    }

    /// Grid of every (x, y) combination, indexed (x index, y index).
    pub fn from_axes(x: &[f64], y: &[f64]) -> Self {
        let shape = (x.len(), y.len());
        Self {
            xx: Array2::from_shape_fn(shape, |(i, _)| x[i]),
            yy: Array2::from_shape_fn(shape, |(_, j)| y[j]),
        }
    }

    /// Grid covering `bbox` with a spacing of `grid_res` in both directions.
    ///
    /// Samples start at the minimum corner; the maximum edge is excluded.
    pub fn from_bbox(bbox: &BoundingBox, grid_res: f64) -> Result<Self> {
        if !(grid_res.is_finite() && grid_res > 0.0) {
            return Err(BoreSliceError::Validation(format!(
                "grid resolution must be positive, got {}",
                grid_res
            )));
        }
        let x = axis(bbox.min_x, bbox.max_x, grid_res);
        let y = axis(bbox.min_y, bbox.max_y, grid_res);
        if x.is_empty() || y.is_empty() {
            return Err(BoreSliceError::Validation(format!(
                "bounding box {:?} is empty at resolution {}",
                bbox, grid_res
            )));
        }
        Ok(Self::from_axes(&x, &y))
    }

    /// Grid shape (x count, y count).
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        self.xx.dim()
    }

    /// Number of grid points.
    #[inline]
    pub fn len(&self) -> usize {
        self.xx.len()
    }

    /// Returns true if the mesh has no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.xx.is_empty()
    }

    /// Easting of every grid cell.
    pub fn xx(&self) -> &Array2<f64> {
        &self.xx
    }

    /// Northing of every grid cell.
    pub fn yy(&self) -> &Array2<f64> {
        &self.yy
    }

    /// Applies `f` to the coordinates of every cell.
    pub fn map<T, F>(&self, f: F) -> Array2<T>
    where
        F: Fn([f64; 2]) -> T,
    {
        Zip::from(&self.xx)
            .and(&self.yy)
            .map_collect(|&x, &y| f([x, y]))
    }

    /// Applies `f` to the coordinates of every cell on the rayon pool.
    pub fn par_map<T, F>(&self, f: F) -> Array2<T>
    where
        T: Send,
        F: Fn([f64; 2]) -> T + Sync + Send,
    {
        Zip::from(&self.xx)
            .and(&self.yy)
            .par_map_collect(|&x, &y| f([x, y]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_axes() {
        let mesh = Mesh::from_axes(&[0.0, 10.0, 20.0], &[5.0, 6.0]);
        assert_eq!(mesh.shape(), (3, 2));
        assert_eq!(mesh.xx()[[2, 0]], 20.0);
        assert_eq!(mesh.yy()[[2, 1]], 6.0);
        assert_eq!(mesh.len(), 6);
    }

    #[test]
    fn test_shape_mismatch() {
        let xx = Array2::zeros((2, 3));
        let yy = Array2::zeros((3, 2));
        assert!(matches!(Mesh::new(xx, yy), Err(BoreSliceError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_deserialize_checks_shape() {
        let mesh = Mesh::from_axes(&[0.0, 1.0], &[0.0, 1.0, 2.0]);
        let json = serde_json::to_string(&mesh).unwrap();
        assert_eq!(serde_json::from_str::<Mesh>(&json).unwrap(), mesh);

        let mismatched = serde_json::json!({
            "xx": serde_json::to_value(Array2::<f64>::zeros((2, 3))).unwrap(),
            "yy": serde_json::to_value(Array2::<f64>::zeros((3, 2))).unwrap(),
        });
        assert!(serde_json::from_value::<Mesh>(mismatched).is_err());
    }

    #[test]
    fn test_from_bbox() {
        let bbox = BoundingBox::new(0.0, 100.0, 300.0, 250.0);
        let mesh = Mesh::from_bbox(&bbox, 100.0).unwrap();
        // x: 0, 100, 200; y: 100, 200
        assert_eq!(mesh.shape(), (3, 2));
        assert_eq!(mesh.xx()[[1, 0]], 100.0);
        assert_eq!(mesh.yy()[[0, 1]], 200.0);
    }

    #[test]
    fn test_from_bbox_invalid() {
        let bbox = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
        assert!(Mesh::from_bbox(&bbox, 0.0).is_err());
        let flat = BoundingBox::new(0.0, 0.0, 0.0, 10.0);
        assert!(Mesh::from_bbox(&flat, 1.0).is_err());
    }

    #[test]
    fn test_bbox_from_points() {
        let bbox = BoundingBox::from_points(vec![(3.0, 1.0), (-1.0, 4.0), (2.0, 2.0)]).unwrap();
        assert_eq!(bbox, BoundingBox::new(-1.0, 1.0, 3.0, 4.0));
        assert!(BoundingBox::from_points(Vec::new()).is_none());
    }

    #[test]
    fn test_map_matches_par_map() {
        let mesh = Mesh::from_axes(&[0.0, 1.0, 2.0], &[0.0, 1.0]);
        let seq = mesh.map(|[x, y]| x * 10.0 + y);
        let par = mesh.par_map(|[x, y]| x * 10.0 + y);
        assert_eq!(seq, par);
        assert_eq!(seq[[2, 1]], 21.0);
    }
}
