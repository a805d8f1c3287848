//! k-nearest-neighbors classifier
//!
//! Distances are Euclidean. Neighbors are ordered by a stable sort on
//! distance, so equidistant training points keep their training order, and
//! vote ties go to the label that appears first among the `k` nearest.

use pa_core::linalg::euclidean_distance;
use pa_core::{ClassificationDataPoint, Label};

use super::dataset::{check_features, feature_count, LabelEncoder};
use super::Classifier;
use crate::base::{ModelError, Result};

/// k-nearest-neighbors classifier
#[derive(Debug, Clone)]
pub struct KNearestNeighbors {
    /// Number of neighbors
    k: usize,
    /// Stored training features
    features: Vec<Vec<f64>>,
    /// Class index of each stored point
    classes: Vec<usize>,
    encoder: LabelEncoder,
    n_features: usize,
}

impl KNearestNeighbors {
    /// Default neighbor count
    pub const DEFAULT_K: usize = 3;

    /// Create an unfitted classifier consulting `k` neighbors
    ///
    /// `k` larger than the training set uses every training point.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            features: Vec::new(),
            classes: Vec::new(),
            encoder: LabelEncoder::default(),
            n_features: 0,
        }
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Training indices and distances of the nearest neighbors of `query`
    fn neighbors(&self, query: &[f64]) -> Result<Vec<(usize, f64)>> {
        let mut distances = self
            .features
            .iter()
            .enumerate()
            .map(|(i, point)| {
                euclidean_distance(query, point)
                    .map(|d| (i, d))
                    .map_err(|e| ModelError::from_linalg(e, "knn_distance"))
            })
            .collect::<Result<Vec<_>>>()?;

        // sort_by is stable: ties keep training order
        distances.sort_by(|a, b| a.1.total_cmp(&b.1));
        distances.truncate(self.k.min(distances.len()));
        Ok(distances)
    }

    /// Majority vote; ties go to the first label reached in distance order
    fn vote(&self, neighbors: &[(usize, f64)]) -> usize {
        let mut counts = vec![0usize; self.encoder.n_classes()];
        let mut first_seen: Vec<usize> = Vec::new();

        for &(i, _) in neighbors {
            let class = self.classes[i];
            if counts[class] == 0 {
                first_seen.push(class);
            }
            counts[class] += 1;
        }

        first_seen
            .iter()
            .fold((0, 0), |best, &class| {
                if counts[class] > best.1 {
                    (class, counts[class])
                } else {
                    best
                }
            })
            .0
    }
}

impl Default for KNearestNeighbors {
    fn default() -> Self {
        Self::new(Self::DEFAULT_K)
    }
}

impl Classifier for KNearestNeighbors {
    fn fit(&mut self, train: &[ClassificationDataPoint]) -> Result<()> {
        if self.k == 0 {
            return Err(ModelError::config("k", "must be at least 1"));
        }

        let n_features = feature_count(train)?;
        let (encoder, classes) = LabelEncoder::fit(train)?;

        self.features = train.iter().map(|p| p.features.clone()).collect();
        self.classes = classes;
        self.encoder = encoder;
        self.n_features = n_features;
        Ok(())
    }

    fn predict(&self, features: &[f64]) -> Result<Label> {
        if self.features.is_empty() {
            return Err(ModelError::numerical("classifier has not been fitted", "knn_predict"));
        }
        check_features(features, self.n_features, "test", 0)?;

        let neighbors = self.neighbors(features)?;
        self.encoder.label(self.vote(&neighbors))
    }
}
