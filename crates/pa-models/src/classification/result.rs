//! Classification result types

use indexmap::IndexMap;
use serde::Serialize;

use pa_core::Label;

use super::ClassifierModel;

/// Counts keyed `[actual][predicted]` by label key, in first-seen order
pub type ConfusionMatrix = IndexMap<String, IndexMap<String, usize>>;

/// Prediction for one test point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    /// Known label of the test point, `null` when it had none
    pub actual: Option<Label>,
    pub predicted: Label,
}

impl Prediction {
    /// Whether the prediction matches a known label
    pub fn is_correct(&self) -> bool {
        self.actual
            .as_ref()
            .is_some_and(|actual| actual.same_class(&self.predicted))
    }
}

/// Result of training and evaluating a classifier
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub model: ClassifierModel,
    pub predictions: Vec<Prediction>,
    /// Share of labeled test points predicted correctly; 0 with none labeled
    pub accuracy: f64,
    pub confusion_matrix: ConfusionMatrix,
}

impl ClassificationResult {
    /// Score a set of predictions
    pub fn from_predictions(model: ClassifierModel, predictions: Vec<Prediction>) -> Self {
        let mut confusion_matrix = ConfusionMatrix::new();
        for prediction in &predictions {
            if let Some(actual) = &prediction.actual {
                *confusion_matrix
                    .entry(actual.key())
                    .or_default()
                    .entry(prediction.predicted.key())
                    .or_default() += 1;
            }
        }

        let labeled = predictions.iter().filter(|p| p.actual.is_some()).count();
        let correct = predictions.iter().filter(|p| p.is_correct()).count();
        let accuracy = if labeled == 0 {
            0.0
        } else {
            correct as f64 / labeled as f64
        };

        Self {
            model,
            predictions,
            accuracy,
            confusion_matrix,
        }
    }

    /// Number of test points that carried a label
    pub fn labeled_count(&self) -> usize {
        self.predictions.iter().filter(|p| p.actual.is_some()).count()
    }

    pub fn correct_count(&self) -> usize {
        self.predictions.iter().filter(|p| p.is_correct()).count()
    }

    /// Predicted labels in test order
    pub fn predicted_labels(&self) -> impl Iterator<Item = &Label> {
        self.predictions.iter().map(|p| &p.predicted)
    }
}
