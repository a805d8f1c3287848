//! Decision tree classifier
//!
//! Grows a binary tree top-down. At every node each feature is sorted and
//! every midpoint between consecutive distinct values is tried as a
//! threshold `x[feature] <= t`; the split with the lowest weighted Gini
//! impurity wins, first-found on ties (feature order, then threshold order).
//! A node becomes a leaf when it is pure, when no split lowers the impurity,
//! or when the optional depth limit is reached. There is no pruning.

use serde::{Deserialize, Serialize};

use pa_core::{ClassificationDataPoint, Label, Matrix};

use super::dataset::{check_features, feature_count, feature_matrix, majority, LabelEncoder};
use super::Classifier;
use crate::base::{ModelError, Result};

/// Impurity decreases smaller than this do not justify a split
const MIN_IMPURITY_DECREASE: f64 = 1e-12;

/// A node of a fitted tree
///
/// Nodes live in a flat arena owned by [`DecisionTree`]; children are
/// referenced by index, so trees of any depth are built, walked and dropped
/// without recursion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TreeNode {
    /// Terminal node predicting the majority class of its samples
    Leaf { class: usize, n_samples: usize },
    /// Internal node: samples with `x[feature] <= threshold` go to `left`
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
}

/// Best split found at a node
#[derive(Debug, Clone, Copy)]
struct SplitCandidate {
    feature: usize,
    threshold: f64,
    impurity: f64,
}

/// Gini decision tree classifier
#[derive(Debug, Clone, Default)]
pub struct DecisionTree {
    max_depth: Option<usize>,
    /// Arena of nodes; the root is at index 0
    nodes: Vec<TreeNode>,
    encoder: LabelEncoder,
    n_features: usize,
}

impl DecisionTree {
    /// Create an unbounded tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop splitting below `max_depth`
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Root of the fitted tree
    pub fn root(&self) -> Option<&TreeNode> {
        self.nodes.first()
    }

    /// All nodes, root first
    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    /// Number of splits on the longest root-to-leaf path
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending: Vec<(usize, usize)> = Vec::new();
        if !self.nodes.is_empty() {
            pending.push((0, 0));
        }
        while let Some((index, depth)) = pending.pop() {
            deepest = deepest.max(depth);
            if let TreeNode::Split { left, right, .. } = self.nodes[index] {
                pending.push((left, depth + 1));
                pending.push((right, depth + 1));
            }
        }
        deepest
    }

    /// Number of leaf nodes
    pub fn n_leaves(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| matches!(node, TreeNode::Leaf { .. }))
            .count()
    }

    fn classify(&self, features: &[f64]) -> Option<usize> {
        let mut index = 0;
        loop {
            match *self.nodes.get(index)? {
                TreeNode::Leaf { class, .. } => return Some(class),
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if features[feature] <= threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }

    /// Class labels in the index order used by [`TreeNode::Leaf`]
    pub fn classes(&self) -> impl Iterator<Item = &Label> {
        self.encoder.labels()
    }
}

impl Classifier for DecisionTree {
    fn fit(&mut self, train: &[ClassificationDataPoint]) -> Result<()> {
        let n_features = feature_count(train)?;
        let (encoder, classes) = LabelEncoder::fit(train)?;

        let builder = TreeBuilder {
            x: feature_matrix(train, n_features),
            y: classes,
            n_classes: encoder.n_classes(),
            max_depth: self.max_depth,
        };
        self.nodes = builder.build((0..train.len()).collect());
        self.encoder = encoder;
        self.n_features = n_features;

        tracing::trace!(
            depth = self.depth(),
            leaves = self.n_leaves(),
            "decision tree grown"
        );
        Ok(())
    }

    fn predict(&self, features: &[f64]) -> Result<Label> {
        if self.nodes.is_empty() {
            return Err(ModelError::numerical(
                "classifier has not been fitted",
                "decision_tree_predict",
            ));
        }
        check_features(features, self.n_features, "test", 0)?;
        let class = self.classify(features).ok_or_else(|| {
            ModelError::numerical("tree references a missing node", "decision_tree_predict")
        })?;
        self.encoder.label(class)
    }
}

struct TreeBuilder {
    x: Matrix,
    y: Vec<usize>,
    n_classes: usize,
    max_depth: Option<usize>,
}

impl TreeBuilder {
    /// Grow the tree over `samples` with an explicit worklist
    fn build(&self, samples: Vec<usize>) -> Vec<TreeNode> {
        let placeholder = TreeNode::Leaf {
            class: 0,
            n_samples: 0,
        };
        let mut nodes = vec![placeholder];
        let mut pending = vec![(0usize, samples, 0usize)];

        while let Some((index, samples, depth)) = pending.pop() {
            let counts = self.class_counts(&samples);
            nodes[index] = TreeNode::Leaf {
                class: majority(&counts),
                n_samples: samples.len(),
            };

            let impurity = gini(&counts, samples.len());
            if impurity <= 0.0 || self.max_depth.is_some_and(|max| depth >= max) {
                continue;
            }
            let Some(split) = self.best_split(&samples, &counts, impurity) else {
                continue;
            };

            let (left, right): (Vec<usize>, Vec<usize>) = samples
                .iter()
                .partition(|&&i| self.x[(i, split.feature)] <= split.threshold);
            if left.is_empty() || right.is_empty() {
                continue;
            }

            let left_index = nodes.len();
            let right_index = left_index + 1;
            nodes.push(placeholder);
            nodes.push(placeholder);
            nodes[index] = TreeNode::Split {
                feature: split.feature,
                threshold: split.threshold,
                left: left_index,
                right: right_index,
            };
            pending.push((right_index, right, depth + 1));
            pending.push((left_index, left, depth + 1));
        }

        nodes
    }

    fn class_counts(&self, samples: &[usize]) -> Vec<usize> {
        let mut counts = vec![0; self.n_classes];
        for &i in samples {
            counts[self.y[i]] += 1;
        }
        counts
    }

    /// Sweep every feature in sorted order, moving one sample at a time
    /// from the right partition to the left
    fn best_split(
        &self,
        samples: &[usize],
        counts: &[usize],
        parent_impurity: f64,
    ) -> Option<SplitCandidate> {
        let n = samples.len();
        let mut best: Option<SplitCandidate> = None;

        for feature in 0..self.x.ncols() {
            let mut order = samples.to_vec();
            order.sort_by(|&a, &b| self.x[(a, feature)].total_cmp(&self.x[(b, feature)]));

            let mut left = vec![0usize; self.n_classes];
            let mut right = counts.to_vec();

            for pos in 0..n - 1 {
                let class = self.y[order[pos]];
                left[class] += 1;
                right[class] -= 1;

                let value = self.x[(order[pos], feature)];
                let next = self.x[(order[pos + 1], feature)];
                if value == next {
                    continue;
                }

                let n_left = pos + 1;
                let n_right = n - n_left;
                let impurity = (n_left as f64 * gini(&left, n_left)
                    + n_right as f64 * gini(&right, n_right))
                    / n as f64;

                if impurity >= parent_impurity - MIN_IMPURITY_DECREASE {
                    continue;
                }
                if best.map_or(true, |b| impurity < b.impurity) {
                    best = Some(SplitCandidate {
                        feature,
                        threshold: midpoint(value, next),
                        impurity,
                    });
                }
            }
        }

        best
    }
}

/// Gini impurity `1 - Σ p_i²` of a class histogram
pub(crate) fn gini(counts: &[usize], total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let n = total as f64;
    1.0 - counts
        .iter()
        .map(|&c| {
            let p = c as f64 / n;
            p * p
        })
        .sum::<f64>()
}

/// Midpoint that still separates `low` from `high`
fn midpoint(low: f64, high: f64) -> f64 {
    let mid = low + (high - low) / 2.0;
    if mid < high {
        mid
    } else {
        low
    }
}
