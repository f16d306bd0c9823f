use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or running model artifacts.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse artifact {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid artifact: {0}")]
    InvalidArtifact(String),
    #[error("feature dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
    #[error("feature index {index} out of range for {dims} dimensions")]
    FeatureOutOfRange { index: usize, dims: usize },
    #[error("non-finite feature value at index {index}")]
    NonFiniteFeature { index: usize },
    #[error("class index {index} out of range for {classes} classes")]
    UnknownClass { index: usize, classes: usize },
}
