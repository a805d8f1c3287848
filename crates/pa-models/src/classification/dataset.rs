//! Training set helpers shared by the classifiers

use indexmap::IndexMap;

use pa_core::{ClassificationDataPoint, Label, Matrix, ValidationError};

use crate::base::{ModelError, Result};

/// Maps labels to dense class indices in first-seen order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelEncoder {
    classes: IndexMap<String, Label>,
}

impl LabelEncoder {
    /// Encode the labels of a training set
    ///
    /// Returns the encoder and one class index per training point.
    pub fn fit(train: &[ClassificationDataPoint]) -> Result<(Self, Vec<usize>)> {
        if train.is_empty() {
            return Err(ValidationError::Empty { set: "training" }.into());
        }

        let mut classes: IndexMap<String, Label> = IndexMap::new();
        let mut encoded = Vec::with_capacity(train.len());

        for (index, point) in train.iter().enumerate() {
            let label = point
                .label
                .as_ref()
                .ok_or(ValidationError::MissingLabel { index })?;
            let entry = classes.entry(label.key());
            encoded.push(entry.index());
            entry.or_insert_with(|| label.clone());
        }

        Ok((Self { classes }, encoded))
    }

    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }

    /// Label for a class index
    pub fn label(&self, class: usize) -> Result<Label> {
        self.classes
            .get_index(class)
            .map(|(_, label)| label.clone())
            .ok_or_else(|| {
                ModelError::numerical(
                    format!("class index {} out of range", class),
                    "label_lookup",
                )
            })
    }

    /// Labels in class-index order
    pub fn labels(&self) -> impl Iterator<Item = &Label> {
        self.classes.values()
    }
}

/// Common feature length of a training set
pub(crate) fn feature_count(train: &[ClassificationDataPoint]) -> Result<usize> {
    let n_features = train
        .first()
        .map(|p| p.features.len())
        .ok_or(ValidationError::Empty { set: "training" })?;
    if n_features == 0 {
        return Err(ValidationError::EmptyFeatures.into());
    }
    for (index, point) in train.iter().enumerate() {
        check_features(&point.features, n_features, "training", index)?;
    }
    Ok(n_features)
}

/// Check one feature vector against the trained dimension
pub(crate) fn check_features(
    features: &[f64],
    n_features: usize,
    set: &'static str,
    index: usize,
) -> Result<()> {
    if features.len() != n_features {
        return Err(ValidationError::DimensionMismatch {
            set,
            index,
            expected: n_features,
            actual: features.len(),
        }
        .into());
    }
    if features.iter().any(|v| !v.is_finite()) {
        return Err(ValidationError::NonFinite {
            set,
            field: "features",
            index,
        }
        .into());
    }
    Ok(())
}

/// Stack training features into an `n x d` matrix
pub(crate) fn feature_matrix(train: &[ClassificationDataPoint], n_features: usize) -> Matrix {
    Matrix::from_shape_fn((train.len(), n_features), |(i, j)| train[i].features[j])
}

/// Index of the largest count; ties go to the lowest index
pub(crate) fn majority(counts: &[usize]) -> usize {
    counts
        .iter()
        .enumerate()
        .fold((0, 0), |best, (class, &count)| {
            if count > best.1 {
                (class, count)
            } else {
                best
            }
        })
        .0
}
