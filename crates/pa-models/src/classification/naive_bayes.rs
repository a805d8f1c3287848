//! Gaussian naive Bayes classifier

use statrs::distribution::{Continuous, Normal};

use pa_core::{ClassificationDataPoint, Label};

use super::dataset::{check_features, feature_count, feature_matrix, LabelEncoder};
use super::Classifier;
use crate::base::{ModelError, Result};

/// Per-class Gaussian likelihood model
#[derive(Debug, Clone)]
struct ClassModel {
    log_prior: f64,
    /// One normal per feature
    likelihoods: Vec<Normal>,
}

impl ClassModel {
    fn log_posterior(&self, features: &[f64]) -> f64 {
        self.log_prior
            + self
                .likelihoods
                .iter()
                .zip(features)
                .map(|(dist, &x)| dist.ln_pdf(x))
                .sum::<f64>()
    }
}

/// Gaussian naive Bayes classifier
///
/// Features are assumed independent given the class and normally
/// distributed with the class mean and population variance. Every variance
/// is widened by `var_smoothing` so constant features stay usable.
#[derive(Debug, Clone)]
pub struct GaussianNaiveBayes {
    var_smoothing: f64,
    classes: Vec<ClassModel>,
    encoder: LabelEncoder,
    n_features: usize,
}

impl GaussianNaiveBayes {
    /// Default variance smoothing
    pub const DEFAULT_VAR_SMOOTHING: f64 = 1e-9;

    pub fn new() -> Self {
        Self {
            var_smoothing: Self::DEFAULT_VAR_SMOOTHING,
            classes: Vec::new(),
            encoder: LabelEncoder::default(),
            n_features: 0,
        }
    }

    pub fn with_var_smoothing(mut self, var_smoothing: f64) -> Self {
        self.var_smoothing = var_smoothing;
        self
    }

    /// Log posterior (up to a shared constant) of every class, in class order
    pub fn log_posteriors(&self, features: &[f64]) -> Result<Vec<f64>> {
        if self.classes.is_empty() {
            return Err(ModelError::numerical(
                "classifier has not been fitted",
                "naive_bayes_predict",
            ));
        }
        check_features(features, self.n_features, "test", 0)?;
        Ok(self
            .classes
            .iter()
            .map(|class| class.log_posterior(features))
            .collect())
    }
}

impl Default for GaussianNaiveBayes {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier for GaussianNaiveBayes {
    fn fit(&mut self, train: &[ClassificationDataPoint]) -> Result<()> {
        if !(self.var_smoothing.is_finite() && self.var_smoothing > 0.0) {
            return Err(ModelError::config(
                "var_smoothing",
                format!("must be positive, got {}", self.var_smoothing),
            ));
        }

        let n_features = feature_count(train)?;
        let (encoder, labels) = LabelEncoder::fit(train)?;
        let x = feature_matrix(train, n_features);
        let n = train.len() as f64;

        let mut classes = Vec::with_capacity(encoder.n_classes());
        for class in 0..encoder.n_classes() {
            let rows: Vec<usize> = (0..labels.len()).filter(|&i| labels[i] == class).collect();
            if rows.is_empty() {
                return Err(ModelError::numerical(
                    format!("class {} has no training samples", class),
                    "naive_bayes_fit",
                ));
            }
            let count = rows.len() as f64;

            let likelihoods = (0..n_features)
                .map(|j| {
                    let mean = rows.iter().map(|&i| x[(i, j)]).sum::<f64>() / count;
                    let variance = rows
                        .iter()
                        .map(|&i| (x[(i, j)] - mean).powi(2))
                        .sum::<f64>()
                        / count
                        + self.var_smoothing;
                    Normal::new(mean, variance.sqrt()).map_err(|e| {
                        ModelError::numerical(e.to_string(), "naive_bayes_fit")
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            classes.push(ClassModel {
                log_prior: (count / n).ln(),
                likelihoods,
            });
        }

        tracing::trace!(n_classes = classes.len(), n_features, "naive bayes fitted");

        self.classes = classes;
        self.encoder = encoder;
        self.n_features = n_features;
        Ok(())
    }

    fn predict(&self, features: &[f64]) -> Result<Label> {
        let posteriors = self.log_posteriors(features)?;

        // strict comparison: ties keep the earlier class
        let best = posteriors
            .iter()
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |best, (class, &lp)| {
                if lp > best.1 {
                    (class, lp)
                } else {
                    best
                }
            })
            .0;
        self.encoder.label(best)
    }
}
