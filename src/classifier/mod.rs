//! Classifier wrapper around an exported, pre-trained model.
//!
//! The artifact is read once, validated, and then only used for inference:
//! `predict` maps an eight-long feature vector to an integer class code
//! which the label encoder turns back into a localization site.

pub mod artifact;
pub mod error;

use std::path::Path;

use anyhow::{Context, Result};

use crate::data::model::Features;
pub use artifact::ModelArtifact;
pub use error::PredictError;

#[derive(Debug, Clone)]
pub struct Classifier {
    artifact: ModelArtifact,
}

impl Classifier {
    /// Read and validate a JSON model artifact.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading model {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("loading model {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let artifact: ModelArtifact =
            serde_json::from_str(text).context("parsing model JSON")?;
        Ok(Self::from_artifact(artifact)?)
    }

    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, PredictError> {
        artifact.validate()?;
        Ok(Classifier { artifact })
    }

    pub fn n_features(&self) -> usize {
        self.artifact.n_features
    }

    /// Predict the class code for one feature vector.
    pub fn predict(&self, features: &[f64]) -> Result<usize, PredictError> {
        if features.len() != self.artifact.n_features {
            return Err(PredictError::FeatureCount {
                expected: self.artifact.n_features,
                got: features.len(),
            });
        }
        if let Some(index) = features.iter().position(|v| !v.is_finite()) {
            return Err(PredictError::NonFinite { index });
        }

        let mut x = features.to_vec();
        if let Some(scaler) = &self.artifact.scaler {
            scaler.transform(&mut x);
        }

        let out = self.artifact.estimator.predict_index(&x);
        Ok(match &self.artifact.classes {
            Some(classes) => classes[out],
            None => out,
        })
    }

    /// Predict every row, failing on the first bad one.
    pub fn predict_batch(&self, rows: &[Features]) -> Result<Vec<usize>, PredictError> {
        rows.iter().map(|row| self.predict(row)).collect()
    }
}
