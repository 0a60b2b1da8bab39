//! Per-slice spatial classification of bore-log observations.

use crate::borelog::{observations_for_depth, BoreLogRecord, BoreLogTable, LithologyColumn};
use crate::config::{InterpolationConfig, Weighting};
use crate::error::Result;
use crate::spatial::{
    BoundingBox, ClassBalancer, Classifier, KNeighborsClassifier, KnnModel, Mesh, TrainingSet,
    NO_DATA,
};
use log::debug;
use ndarray::Array2;

/// Fits a k-NN classifier on the observations of one elevation slice and
/// evaluates it over a mesh.
#[derive(Debug, Clone)]
pub struct SpatialClassifier {
    weighting: Weighting,
    parallel: bool,
    column: LithologyColumn,
}

impl SpatialClassifier {
    /// Creates a classifier from the interpolation configuration.
    pub fn new(config: &InterpolationConfig) -> Self {
        Self {
            weighting: config.weighting,
            parallel: config.parallel,
            column: LithologyColumn::Primary,
        }
    }

    /// Uses the labels of `column` instead of the primary lithology.
    pub fn with_column(mut self, column: LithologyColumn) -> Self {
        self.column = column;
        self
    }

    /// Label column the training observations are taken from.
    pub fn column(&self) -> LithologyColumn {
        self.column
    }

    fn training_set(&self, observations: &[&BoreLogRecord]) -> TrainingSet {
        TrainingSet::from_column(observations, self.column)
    }

    fn fit(&self, training: TrainingSet, n_neighbors: usize) -> Option<KnnModel> {
        if n_neighbors == 0 || n_neighbors > training.len() {
            debug!(
                "{} neighbours requested but only {} observations available; slice has no data",
                n_neighbors,
                training.len()
            );
            return None;
        }
        KNeighborsClassifier::new(n_neighbors, self.weighting)
            .fit(training)
            .ok()
    }

    /// Fits a model on `observations`, `None` if there are fewer observations
    /// than requested neighbours.
    pub fn knn_model(&self, observations: &[&BoreLogRecord], n_neighbors: usize) -> Option<KnnModel> {
        self.fit(self.training_set(observations), n_neighbors)
    }

    fn evaluate<T, F>(&self, mesh: &Mesh, f: F) -> Array2<T>
    where
        T: Send,
        F: Fn([f64; 2]) -> T + Sync + Send,
    {
        if self.parallel {
            mesh.par_map(f)
        } else {
            mesh.map(f)
        }
    }

    /// Predicted class number at every mesh point.
    ///
    /// Without a model every cell is [`NO_DATA`].
    pub fn predict_over_mesh<C: Classifier>(&self, model: Option<&C>, mesh: &Mesh) -> Array2<f64> {
        match model {
            Some(model) => self.evaluate(mesh, |p| model.predict_point(p) as f64),
            None => Array2::from_elem(mesh.shape(), NO_DATA),
        }
    }

    /// Fits on `observations` and predicts the class number at every mesh
    /// point.
    ///
    /// When `n_neighbors` exceeds the number of usable observations the grid
    /// is filled with [`NO_DATA`] instead.
    pub fn fit_and_predict(
        &self,
        observations: &[&BoreLogRecord],
        n_neighbors: usize,
        mesh: &Mesh,
    ) -> Array2<f64> {
        let model = self.knn_model(observations, n_neighbors);
        self.predict_over_mesh(model.as_ref(), mesh)
    }

    /// Per-class probability grids.
    ///
    /// One grid per class of the fitted classifier, in ascending class
    /// number. With a `balancer` that is exactly the balancer's classes in
    /// vocabulary order. A degenerate slice yields [`NO_DATA`] grids, one per
    /// class the classifier would have reported.
    pub fn class_probabilities(
        &self,
        observations: &[&BoreLogRecord],
        n_neighbors: usize,
        mesh: &Mesh,
        balancer: Option<&ClassBalancer>,
    ) -> Vec<Array2<f64>> {
        let mut training = self.training_set(observations);
        if let Some(balancer) = balancer {
            training = balancer.pad(training);
        }
        let n_classes = training.classes().len();

        let model = match self.fit(training, n_neighbors) {
            Some(model) => model,
            None => {
                return (0..n_classes)
                    .map(|_| Array2::from_elem(mesh.shape(), NO_DATA))
                    .collect()
            }
        };

        let proba = self.evaluate(mesh, |p| model.predict_proba_point(p));
        (0..n_classes)
            .map(|c| proba.map(|cell| cell[c]))
            .collect()
    }

    /// Class numbers predicted over `mesh` at `elevation`.
    pub fn interpolate_slice(
        &self,
        table: &BoreLogTable,
        elevation: f64,
        n_neighbors: usize,
        mesh: &Mesh,
    ) -> Array2<f64> {
        let observations = observations_for_depth(table, elevation, self.column);
        debug!("{} observations at elevation {}", observations.len(), elevation);
        self.fit_and_predict(&observations, n_neighbors, mesh)
    }

    /// [`interpolate_slice`](Self::interpolate_slice) over a mesh covering
    /// `bbox` at `grid_res` spacing.
    pub fn interpolate_slice_bbox(
        &self,
        table: &BoreLogTable,
        elevation: f64,
        n_neighbors: usize,
        bbox: &BoundingBox,
        grid_res: f64,
    ) -> Result<Array2<f64>> {
        let mesh = Mesh::from_bbox(bbox, grid_res)?;
        Ok(self.interpolate_slice(table, elevation, n_neighbors, &mesh))
    }

    /// Class probability grids over `mesh` at `elevation`.
    pub fn class_probabilities_at_depth(
        &self,
        table: &BoreLogTable,
        elevation: f64,
        n_neighbors: usize,
        mesh: &Mesh,
        balancer: Option<&ClassBalancer>,
    ) -> Vec<Array2<f64>> {
        let observations = observations_for_depth(table, elevation, self.column);
        debug!("{} observations at elevation {}", observations.len(), elevation);
        self.class_probabilities(&observations, n_neighbors, mesh, balancer)
    }

    /// [`class_probabilities_at_depth`](Self::class_probabilities_at_depth)
    /// over a mesh covering `bbox` at `grid_res` spacing.
    pub fn class_probabilities_at_depth_bbox(
        &self,
        table: &BoreLogTable,
        elevation: f64,
        n_neighbors: usize,
        bbox: &BoundingBox,
        grid_res: f64,
        balancer: Option<&ClassBalancer>,
    ) -> Result<Vec<Array2<f64>>> {
        let mesh = Mesh::from_bbox(bbox, grid_res)?;
        Ok(self.class_probabilities_at_depth(table, elevation, n_neighbors, &mesh, balancer))
    }
}

impl Default for SpatialClassifier {
    fn default() -> Self {
        Self::new(&InterpolationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::is_no_data;

    fn record(easting: f64, northing: f64, label: &str, class: u32) -> BoreLogRecord {
        BoreLogRecord::new(easting, northing, 10.0, 0.0, "").with_primary(label, Some(class))
    }

    fn observations() -> Vec<BoreLogRecord> {
        vec![
            record(100.0, 100.0, "sand", 0),
            record(110.0, 100.0, "sand", 0),
            record(100.0, 110.0, "sand", 0),
            record(300.0, 300.0, "clay", 2),
            record(310.0, 300.0, "clay", 2),
            record(300.0, 310.0, "clay", 2),
        ]
    }

    fn mesh() -> Mesh {
        Mesh::from_axes(&[100.0, 200.0, 300.0], &[100.0, 300.0])
    }

    #[test]
    fn test_fit_and_predict() {
        let records = observations();
        let refs: Vec<&BoreLogRecord> = records.iter().collect();
        let grid = SpatialClassifier::default().fit_and_predict(&refs, 3, &mesh());
        assert_eq!(grid.dim(), (3, 2));
        assert_eq!(grid[[0, 0]], 0.0);
        assert_eq!(grid[[2, 1]], 2.0);
    }

    #[test]
    fn test_degenerate_slice_is_no_data() {
        let records = observations();
        let refs: Vec<&BoreLogRecord> = records.iter().take(3).collect();
        let grid = SpatialClassifier::default().fit_and_predict(&refs, 50, &mesh());
        assert_eq!(grid.dim(), mesh().shape());
        assert!(grid.iter().all(|v| is_no_data(*v)));
    }

    #[test]
    fn test_sequential_matches_parallel() {
        let records = observations();
        let refs: Vec<&BoreLogRecord> = records.iter().collect();
        let config = InterpolationConfig {
            parallel: false,
            ..Default::default()
        };
        let seq = SpatialClassifier::new(&config).fit_and_predict(&refs, 4, &mesh());
        let par = SpatialClassifier::default().fit_and_predict(&refs, 4, &mesh());
        assert_eq!(seq, par);
    }

    #[test]
    fn test_probabilities_without_balancer() {
        let records = observations();
        let refs: Vec<&BoreLogRecord> = records.iter().collect();
        let probs = SpatialClassifier::default().class_probabilities(&refs, 3, &mesh(), None);
        // only classes 0 and 2 were observed
        assert_eq!(probs.len(), 2);
        assert!((probs[0][[0, 0]] - 1.0).abs() < 1e-10);
        assert!((probs[1][[2, 1]] - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_probabilities_with_balancer() {
        let records = observations();
        let refs: Vec<&BoreLogRecord> = records.iter().collect();
        let balancer = ClassBalancer::new(7);
        let probs = SpatialClassifier::default().class_probabilities(&refs, 3, &mesh(), Some(&balancer));
        assert_eq!(probs.len(), 7);
        for (i, j) in [(0, 0), (1, 1), (2, 0)] {
            let total: f64 = probs.iter().map(|p| p[[i, j]]).sum();
            assert!((total - 1.0).abs() < 1e-10);
        }
        // far from the anchors the observed classes dominate
        assert!(probs[2][[2, 1]] > 0.9);
    }

    #[test]
    fn test_degenerate_probabilities() {
        let records = observations();
        let refs: Vec<&BoreLogRecord> = records.iter().take(2).collect();
        let balancer = ClassBalancer::new(3);
        let probs = SpatialClassifier::default().class_probabilities(&refs, 20, &mesh(), Some(&balancer));
        assert_eq!(probs.len(), 3);
        assert!(probs.iter().all(|p| p.iter().all(|v| is_no_data(*v))));
    }

    #[test]
    fn test_interpolate_slice_filters_by_elevation() {
        let mut records = observations();
        // sand intervals top out at 5, so only the clay rows cross elevation 15
        for r in records.iter_mut().take(3) {
            r.depth_from_ahd = 5.0;
        }
        for r in records.iter_mut().skip(3) {
            r.depth_from_ahd = 20.0;
        }
        let table = BoreLogTable::new(records).unwrap();
        let grid = SpatialClassifier::default().interpolate_slice(&table, 15.0, 3, &mesh());
        assert!(grid.iter().all(|v| *v == 2.0));
    }

    #[test]
    fn test_bbox_uses_computed_mesh() {
        let table = BoreLogTable::new(observations()).unwrap();
        let bbox = BoundingBox::new(100.0, 100.0, 400.0, 400.0);
        let classifier = SpatialClassifier::default();

        let grid = classifier
            .interpolate_slice_bbox(&table, 5.0, 3, &bbox, 100.0)
            .unwrap();
        assert_eq!(grid.dim(), (3, 3));

        let probs = classifier
            .class_probabilities_at_depth_bbox(&table, 5.0, 3, &bbox, 100.0, Some(&ClassBalancer::new(3)))
            .unwrap();
        assert_eq!(probs.len(), 3);
        assert!(probs.iter().all(|p| p.dim() == (3, 3)));
    }
}
