//! Classification models
//!
//! Three train-and-predict classifiers sharing one contract:
//! - k-nearest-neighbors (Euclidean distance, majority vote)
//! - Decision tree (binary splits minimizing weighted Gini impurity)
//! - Gaussian naive Bayes (per-class feature means and variances)
//!
//! [`classify`] validates a train/test pair, fits the selected model on the
//! training set and scores it on the test set in a single call.

pub mod dataset;
pub mod knn;
pub mod naive_bayes;
pub mod result;
pub mod tree;


// Re-exports
pub use knn::KNearestNeighbors;
pub use naive_bayes::GaussianNaiveBayes;
pub use result::{ClassificationResult, ConfusionMatrix, Prediction};
pub use tree::{DecisionTree, TreeNode};

use std::fmt;
use std::str::FromStr;

use pa_core::data::validate_classification;
use pa_core::{ClassificationDataPoint, Label};
use serde::{Deserialize, Serialize};

use crate::base::{ModelError, Result};

/// Classifier family, serialized as its discriminator token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassifierModel {
    Knn,
    DecisionTree,
    NaiveBayes,
}

impl fmt::Display for ClassifierModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassifierModel::Knn => write!(f, "knn"),
            ClassifierModel::DecisionTree => write!(f, "decision_tree"),
            ClassifierModel::NaiveBayes => write!(f, "naive_bayes"),
        }
    }
}

impl FromStr for ClassifierModel {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "knn" | "k_nearest_neighbors" => Ok(ClassifierModel::Knn),
            "decision_tree" | "tree" => Ok(ClassifierModel::DecisionTree),
            "naive_bayes" | "gaussian_nb" => Ok(ClassifierModel::NaiveBayes),
            other => Err(ModelError::config(
                "model",
                format!("unknown classifier '{}'", other),
            )),
        }
    }
}

/// Classifier options; each model reads only the fields it needs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClassificationOptions {
    /// Neighbors consulted by kNN
    pub k: usize,
    /// Added to every naive Bayes variance
    pub var_smoothing: f64,
    /// Optional decision tree depth limit; unbounded when `None`
    pub max_depth: Option<usize>,
}

impl Default for ClassificationOptions {
    fn default() -> Self {
        Self {
            k: KNearestNeighbors::DEFAULT_K,
            var_smoothing: GaussianNaiveBayes::DEFAULT_VAR_SMOOTHING,
            max_depth: None,
        }
    }
}

impl ClassificationOptions {
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    pub fn with_var_smoothing(mut self, var_smoothing: f64) -> Self {
        self.var_smoothing = var_smoothing;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }
}

/// Fit-then-predict contract shared by the classifiers
pub trait Classifier {
    /// Learn from labeled training points
    fn fit(&mut self, train: &[ClassificationDataPoint]) -> Result<()>;

    /// Predict the label of one feature vector
    fn predict(&self, features: &[f64]) -> Result<Label>;
}

impl ClassifierModel {
    /// Build an unfitted classifier for this model
    pub fn build(&self, options: &ClassificationOptions) -> Box<dyn Classifier> {
        match self {
            ClassifierModel::Knn => Box::new(KNearestNeighbors::new(options.k)),
            ClassifierModel::DecisionTree => {
                let tree = DecisionTree::new();
                Box::new(match options.max_depth {
                    Some(depth) => tree.with_max_depth(depth),
                    None => tree,
                })
            }
            ClassifierModel::NaiveBayes => {
                Box::new(GaussianNaiveBayes::new().with_var_smoothing(options.var_smoothing))
            }
        }
    }
}

/// Train `model` on `train` and evaluate it on `test`
pub fn classify(
    train: &[ClassificationDataPoint],
    test: &[ClassificationDataPoint],
    model: ClassifierModel,
    options: &ClassificationOptions,
) -> Result<ClassificationResult> {
    tracing::debug!(
        %model,
        n_train = train.len(),
        n_test = test.len(),
        "running classifier"
    );
    validate_classification(train, test)?;

    let mut classifier = model.build(options);
    classifier.fit(train)?;

    let predictions = test
        .iter()
        .map(|point| {
            Ok(Prediction {
                actual: point.label.clone(),
                predicted: classifier.predict(&point.features)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(ClassificationResult::from_predictions(model, predictions))
}

/// k-nearest-neighbors, `k = 3` unless given
pub fn knn_classifier(
    train: &[ClassificationDataPoint],
    test: &[ClassificationDataPoint],
    k: Option<usize>,
) -> Result<ClassificationResult> {
    let options = ClassificationOptions::default().with_k(k.unwrap_or(KNearestNeighbors::DEFAULT_K));
    classify(train, test, ClassifierModel::Knn, &options)
}

/// Unpruned Gini decision tree
pub fn decision_tree_classifier(
    train: &[ClassificationDataPoint],
    test: &[ClassificationDataPoint],
) -> Result<ClassificationResult> {
    classify(
        train,
        test,
        ClassifierModel::DecisionTree,
        &ClassificationOptions::default(),
    )
}

/// Gaussian naive Bayes
pub fn naive_bayes_classifier(
    train: &[ClassificationDataPoint],
    test: &[ClassificationDataPoint],
) -> Result<ClassificationResult> {
    classify(
        train,
        test,
        ClassifierModel::NaiveBayes,
        &ClassificationOptions::default(),
    )
}
