use model::{FeatureVector, LabelTable, ScoreProducer, ScoreVector};

use crate::config::DecisionConfig;
use crate::detector::detect_unknown;
use crate::error::DecisionError;
use crate::normalize::softmax;
use crate::resolver::{resolve_diagnosis, Resolution};


/// Confidence-gated decision engine.
///
/// Holds only its thresholds; every call is a pure function of its inputs,
/// so one engine can serve any number of concurrent requests.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DecisionEngine {
    config: DecisionConfig,
}

impl DecisionEngine {
    /// Build an engine with validated thresholds.
    pub fn new(config: DecisionConfig) -> Result<Self, DecisionError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &DecisionConfig {
        &self.config
    }

    /// Full decision path for one feature vector.
    ///
    /// An all-zero vector short-circuits to [`Resolution::no_signal`] before
    /// the scorer is consulted. Otherwise: scores → softmax → unknown
    /// detector → label lookup.
    pub fn decide(
        &self,
        features: &FeatureVector,
        scorer: &dyn ScoreProducer,
        labels: &dyn LabelTable,
    ) -> Result<Resolution, DecisionError> {
        if features.is_zero() {
            tracing::debug!(dims = features.dims(), "no vocabulary terms matched");
            return Ok(Resolution::no_signal());
        }
        let scores = scorer.decision_scores(features)?;
        self.decide_scores(&scores, labels)
    }

    /// Decision path for scores that are already computed.
    pub fn decide_scores(
        &self,
        scores: &ScoreVector,
        labels: &dyn LabelTable,
    ) -> Result<Resolution, DecisionError> {
        if scores.len() != labels.len() {
            return Err(DecisionError::LabelCountMismatch {
                scores: scores.len(),
                labels: labels.len(),
            });
        }
        let confidences = softmax(scores)?;
        let decision = detect_unknown(scores, &confidences, &self.config)?;
        tracing::debug!(
            best_index = decision.best_index,
            confidence = decision.confidence,
            margin = decision.margin,
            accepted = decision.accepted,
            "unknown detector decision"
        );
        resolve_diagnosis(&decision, labels)
    }
}
