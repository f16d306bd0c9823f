use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::artifact::{CLASSIFIER_FILE, LABELS_FILE, VECTORIZER_FILE};
use crate::error::ModelError;
use crate::labels::LabelEncoder;
use crate::linear::LinearClassifier;
use crate::tfidf::TfidfVectorizer;
use crate::traits::{LabelTable, ScoreProducer, Vectorizer};

/// Immutable bundle of loaded model artifacts.
///
/// Built once at startup and shared behind an `Arc`; nothing writes to it
/// afterwards, so concurrent requests read it without locking.
pub struct ModelContext {
    vectorizer: Box<dyn Vectorizer>,
    scorer: Box<dyn ScoreProducer>,
    labels: Box<dyn LabelTable>,
}

impl ModelContext {
    /// Assemble a context from arbitrary collaborator implementations.
    ///
    /// Checks that the vectorizer and classifier agree on dimensionality, that
    /// every class has a label, and that there are at least two classes.
    pub fn new(
        vectorizer: Box<dyn Vectorizer>,
        scorer: Box<dyn ScoreProducer>,
        labels: Box<dyn LabelTable>,
    ) -> Result<Self, ModelError> {
        if vectorizer.dimensions() != scorer.dimensions() {
            return Err(ModelError::DimensionMismatch {
                expected: scorer.dimensions(),
                found: vectorizer.dimensions(),
            });
        }
        if scorer.num_classes() != labels.len() {
            return Err(ModelError::InvalidArtifact(format!(
                "classifier has {} classes but the label table has {}",
                scorer.num_classes(),
                labels.len()
            )));
        }
        if scorer.num_classes() < 2 {
            return Err(ModelError::InvalidArtifact(format!(
                "at least two classes are required, found {}",
                scorer.num_classes()
            )));
        }
        Ok(Self {
            vectorizer,
            scorer,
            labels,
        })
    }

    /// Load `vectorizer.json`, `classifier.json` and `labels.json` from a
    /// directory.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, ModelError> {
        let dir = dir.as_ref();
        let vectorizer = TfidfVectorizer::from_file(dir.join(VECTORIZER_FILE))?;
        let scorer = LinearClassifier::from_file(dir.join(CLASSIFIER_FILE))?;
        let labels = LabelEncoder::from_file(dir.join(LABELS_FILE))?;
        Self::new(Box::new(vectorizer), Box::new(scorer), Box::new(labels))
    }

    pub fn vectorizer(&self) -> &dyn Vectorizer {
        self.vectorizer.as_ref()
    }

    pub fn scorer(&self) -> &dyn ScoreProducer {
        self.scorer.as_ref()
    }

    pub fn labels(&self) -> &dyn LabelTable {
        self.labels.as_ref()
    }

    pub fn num_classes(&self) -> usize {
        self.scorer.num_classes()
    }

    pub fn dimensions(&self) -> usize {
        self.vectorizer.dimensions()
    }
}

impl fmt::Debug for ModelContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelContext")
            .field("dimensions", &self.dimensions())
            .field("classes", &self.num_classes())
            .finish()
    }
}

/// Process-wide artifact state.
///
/// A failed initialization is recorded as `Degraded` for the rest of the
/// process lifetime; there is no retry.
#[derive(Debug, Clone)]
pub enum ArtifactState {
    Ready(Arc<ModelContext>),
    Degraded { reason: String },
}

impl ArtifactState {
    /// Load artifacts from `dir`, logging the outcome.
    pub fn initialize(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        match ModelContext::load_dir(dir) {
            Ok(ctx) => {
                tracing::info!(
                    artifacts_dir = %dir.display(),
                    dimensions = ctx.dimensions(),
                    classes = ctx.num_classes(),
                    "model artifacts loaded"
                );
                ArtifactState::Ready(Arc::new(ctx))
            }
            Err(err) => {
                tracing::warn!(
                    artifacts_dir = %dir.display(),
                    error = %err,
                    "model artifacts failed to load; running degraded"
                );
                ArtifactState::Degraded {
                    reason: err.to_string(),
                }
            }
        }
    }

    pub fn ready(ctx: ModelContext) -> Self {
        ArtifactState::Ready(Arc::new(ctx))
    }

    pub fn context(&self) -> Option<&Arc<ModelContext>> {
        match self {
            ArtifactState::Ready(ctx) => Some(ctx),
            ArtifactState::Degraded { .. } => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ArtifactState::Ready(_))
    }
}
