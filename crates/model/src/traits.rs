//! Collaborator seams of the decision engine.
//!
//! The engine only talks to these traits, so tests can swap in mock
//! artifacts and deployments can back them with any trained model. All of
//! them are `Send + Sync`: a loaded artifact is shared read-only across every
//! concurrent request.

use crate::error::ModelError;
use crate::features::{FeatureVector, ScoreVector};

/// Turns canonical symptom text into a sparse feature vector.
///
/// Must be deterministic for identical input text.
pub trait Vectorizer: Send + Sync {
    /// Vocabulary size, i.e. the dimensionality of every produced vector.
    fn dimensions(&self) -> usize;

    fn transform(&self, text: &str) -> Result<FeatureVector, ModelError>;

    /// Vectorize words already tokenized upstream, in text order.
    fn transform_tokens(&self, tokens: &[&str]) -> Result<FeatureVector, ModelError>;
}

/// Produces one decision score per known class.
pub trait ScoreProducer: Send + Sync {
    /// Expected feature dimensionality.
    fn dimensions(&self) -> usize;

    /// Number of classes, fixed when the classifier was built.
    fn num_classes(&self) -> usize;

    fn decision_scores(&self, features: &FeatureVector) -> Result<ScoreVector, ModelError>;
}

/// Maps class indices to disease names.
pub trait LabelTable: Send + Sync {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Name of the class at `index`; total over `0..len()`.
    fn name_of(&self, index: usize) -> Result<&str, ModelError>;
}
