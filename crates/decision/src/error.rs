use model::ModelError;
use thiserror::Error;

/// Errors produced by the decision layer.
#[derive(Debug, Error)]
pub enum DecisionError {
    /// Threshold configuration is out of range.
    #[error("invalid decision config: {0}")]
    InvalidConfig(String),
    /// Softmax and margin need at least two classes.
    #[error("at least two class scores are required, found {found}")]
    TooFewClasses { found: usize },
    /// A decision score was NaN or infinite.
    #[error("decision score at index {index} is not finite")]
    NonFiniteScore { index: usize },
    /// Scores and confidences are not index-aligned.
    #[error("{scores} scores paired with {confidences} confidences")]
    LengthMismatch { scores: usize, confidences: usize },
    /// Classifier output does not cover the label table.
    #[error("{scores} scores for {labels} labels")]
    LabelCountMismatch { scores: usize, labels: usize },
    /// A collaborator (classifier or label table) failed.
    #[error("model error: {0}")]
    Model(#[from] ModelError),
}
