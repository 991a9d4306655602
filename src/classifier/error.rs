use thiserror::Error;

/// Errors raised while validating a model artifact or running inference.
#[derive(Debug, Error, PartialEq)]
pub enum PredictError {
    /// The feature vector does not have the length the model was fitted on.
    #[error("expected {expected} features, got {got}")]
    FeatureCount { expected: usize, got: usize },
    /// A feature is NaN or infinite.
    #[error("feature {index} is not a finite number")]
    NonFinite { index: usize },
    /// The artifact is internally inconsistent.
    #[error("invalid model artifact: {0}")]
    InvalidArtifact(String),
}
