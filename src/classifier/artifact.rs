use serde::{Deserialize, Serialize};

use super::error::PredictError;

// ---------------------------------------------------------------------------
// Artifact schema
// ---------------------------------------------------------------------------

/// A fitted classifier exported to JSON.
///
/// ```json
/// {
///   "n_features": 8,
///   "classes": [0, 1, 2],
///   "scaler": { "mean": [...], "scale": [...] },
///   "estimator": { "kind": "decision_tree", ... }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub n_features: usize,
    /// Class code emitted for each estimator output index. Identity if absent.
    #[serde(default)]
    pub classes: Option<Vec<usize>>,
    #[serde(default)]
    pub scaler: Option<Scaler>,
    pub estimator: Estimator,
}

/// Standardisation applied before the estimator: `(x - mean) / scale`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Estimator {
    Linear(LinearModel),
    DecisionTree(Tree),
    RandomForest(Forest),
}

/// One coefficient row per class, or a single row for a binary problem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearModel {
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
}

/// A binary decision tree in flattened node-array form.
///
/// Node `i` is a leaf when `children_left[i] < 0`. Otherwise samples with
/// `x[feature[i]] <= threshold[i]` go to `children_left[i]`, the rest to
/// `children_right[i]`. `value[i]` holds the class distribution at the node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Forest {
    pub trees: Vec<Tree>,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn invalid(msg: impl Into<String>) -> PredictError {
    PredictError::InvalidArtifact(msg.into())
}

impl ModelArtifact {
    /// Check every array length against `n_features` and the class count.
    pub fn validate(&self) -> Result<(), PredictError> {
        if self.n_features == 0 {
            return Err(invalid("n_features must be positive"));
        }
        if let Some(scaler) = &self.scaler {
            if scaler.mean.len() != self.n_features || scaler.scale.len() != self.n_features {
                return Err(invalid("scaler length does not match n_features"));
            }
        }

        let n_outputs = self.estimator.validate(self.n_features)?;

        if let Some(classes) = &self.classes {
            if classes.len() != n_outputs {
                return Err(invalid(format!(
                    "{} classes listed but the estimator has {n_outputs} outputs",
                    classes.len()
                )));
            }
        }
        Ok(())
    }
}

impl Estimator {
    /// Validate and return the number of estimator outputs.
    fn validate(&self, n_features: usize) -> Result<usize, PredictError> {
        match self {
            Estimator::Linear(m) => m.validate(n_features),
            Estimator::DecisionTree(t) => t.validate(n_features),
            Estimator::RandomForest(f) => {
                let first = f.trees.first().ok_or_else(|| invalid("forest has no trees"))?;
                let n_outputs = first.validate(n_features)?;
                for (i, tree) in f.trees.iter().enumerate().skip(1) {
                    if tree.validate(n_features)? != n_outputs {
                        return Err(invalid(format!("tree {i} has a different class count")));
                    }
                }
                Ok(n_outputs)
            }
        }
    }
}

impl LinearModel {
    fn validate(&self, n_features: usize) -> Result<usize, PredictError> {
        if self.coef.is_empty() {
            return Err(invalid("linear model has no coefficients"));
        }
        if self.coef.len() != self.intercept.len() {
            return Err(invalid("coef and intercept lengths differ"));
        }
        if self.coef.iter().any(|row| row.len() != n_features) {
            return Err(invalid("coef row length does not match n_features"));
        }
        Ok(if self.coef.len() == 1 { 2 } else { self.coef.len() })
    }
}

impl Tree {
    fn validate(&self, n_features: usize) -> Result<usize, PredictError> {
        let n_nodes = self.children_left.len();
        if n_nodes == 0 {
            return Err(invalid("tree has no nodes"));
        }
        if self.children_right.len() != n_nodes
            || self.feature.len() != n_nodes
            || self.threshold.len() != n_nodes
            || self.value.len() != n_nodes
        {
            return Err(invalid("tree node arrays differ in length"));
        }

        let n_outputs = self.value[0].len();
        if n_outputs == 0 || self.value.iter().any(|v| v.len() != n_outputs) {
            return Err(invalid("tree value rows differ in length"));
        }

        for node in 0..n_nodes {
            if self.children_left[node] < 0 {
                continue;
            }
            // Children always follow their parent, which also rules out cycles.
            for child in [self.children_left[node], self.children_right[node]] {
                if child <= node as i64 || child >= n_nodes as i64 {
                    return Err(invalid(format!("node {node} has out-of-range child {child}")));
                }
            }
            let f = self.feature[node];
            if f < 0 || f >= n_features as i64 {
                return Err(invalid(format!("node {node} splits on feature {f}")));
            }
        }
        Ok(n_outputs)
    }
}

// ---------------------------------------------------------------------------
// Inference
// ---------------------------------------------------------------------------

/// Index of the largest score; ties resolve to the lowest index.
pub(crate) fn argmax(scores: &[f64]) -> usize {
    let mut best = 0;
    for (i, &s) in scores.iter().enumerate().skip(1) {
        if s > scores[best] {
            best = i;
        }
    }
    best
}

impl Scaler {
    pub fn transform(&self, x: &mut [f64]) {
        for ((v, &mean), &scale) in x.iter_mut().zip(&self.mean).zip(&self.scale) {
            let scale = if scale == 0.0 { 1.0 } else { scale };
            *v = (*v - mean) / scale;
        }
    }
}

impl Estimator {
    /// Output index for one (already scaled) feature vector.
    pub fn predict_index(&self, x: &[f64]) -> usize {
        match self {
            Estimator::Linear(m) => m.predict_index(x),
            Estimator::DecisionTree(t) => argmax(t.leaf_value(x)),
            Estimator::RandomForest(f) => argmax(&f.mean_distribution(x)),
        }
    }
}

impl LinearModel {
    fn decision(&self, x: &[f64]) -> Vec<f64> {
        self.coef
            .iter()
            .zip(&self.intercept)
            .map(|(row, b)| row.iter().zip(x).map(|(w, v)| w * v).sum::<f64>() + b)
            .collect()
    }

    fn predict_index(&self, x: &[f64]) -> usize {
        let scores = self.decision(x);
        if scores.len() == 1 {
            usize::from(scores[0] > 0.0)
        } else {
            argmax(&scores)
        }
    }
}

impl Tree {
    /// Class distribution stored at the leaf `x` falls into.
    pub fn leaf_value(&self, x: &[f64]) -> &[f64] {
        let mut node = 0usize;
        while self.children_left[node] >= 0 {
            let f = self.feature[node] as usize;
            node = if x[f] <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }
        &self.value[node]
    }
}

impl Forest {
    /// Average of the per-tree leaf distributions, each normalised to sum 1.
    fn mean_distribution(&self, x: &[f64]) -> Vec<f64> {
        let mut acc: Vec<f64> = Vec::new();
        for tree in &self.trees {
            let leaf = tree.leaf_value(x);
            if acc.is_empty() {
                acc = vec![0.0; leaf.len()];
            }
            let total: f64 = leaf.iter().sum();
            let norm = if total > 0.0 { total } else { 1.0 };
            for (a, v) in acc.iter_mut().zip(leaf) {
                *a += v / norm;
            }
        }
        let n = self.trees.len().max(1) as f64;
        acc.iter_mut().for_each(|a| *a /= n);
        acc
    }
}
