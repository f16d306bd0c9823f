//! Request pipeline: symptom text in, diagnosis and recovery plan out.

use std::fmt;
use std::sync::Arc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use canonical::{CanonicalError, CanonicalizeConfig, CanonicalizedText, canonicalize};
use decision::{DecisionEngine, Resolution};
use model::{ArtifactState, ModelContext};
use recovery::{RecoveryPlan, RecoveryTable};

use crate::config::{ConfigLoadError, TriageConfig};
use crate::metrics::{MetricsSpan, PredictOutcome};

/// Incoming prediction request. A missing `symptoms` field reads as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub symptoms: String,
}

impl PredictRequest {
    pub fn new(symptoms: impl Into<String>) -> Self {
        Self {
            symptoms: symptoms.into(),
        }
    }
}

/// Successful prediction, including "Unknown Condition" outcomes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictResponse {
    pub disease: String,
    /// `"73.2%"` style, or exactly `"0%"` when no vocabulary term matched.
    pub confidence: String,
    pub original_input: String,
    pub recovery: RecoveryPlan,
}

/// Error body returned in place of a [`PredictResponse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Either response shape, serialized without a tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PredictReply {
    Success(PredictResponse),
    Error(ErrorResponse),
}

impl From<Result<PredictResponse, PredictError>> for PredictReply {
    fn from(result: Result<PredictResponse, PredictError>) -> Self {
        match result {
            Ok(response) => PredictReply::Success(response),
            Err(err) => PredictReply::Error(err.to_response()),
        }
    }
}

/// Pipeline stage a computation failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Canonicalize,
    Vectorize,
    Decide,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Canonicalize => "canonicalize",
            Stage::Vectorize => "vectorize",
            Stage::Decide => "decide",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User-visible prediction failure.
///
/// Messages are fixed; collaborator detail is logged, never returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PredictError {
    #[error("Model not loaded on server.")]
    ServiceUnavailable,
    #[error("No symptoms provided.")]
    InvalidInput,
    #[error("Failed to process symptoms.")]
    ComputationFailure { stage: Stage },
}

impl PredictError {
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.to_string(),
        }
    }
}

/// Shared, read-only prediction pipeline.
///
/// Holds the artifact state, normalization settings, thresholds and the
/// recovery table. `predict` takes `&self`, so one instance serves any
/// number of threads.
#[derive(Debug, Clone)]
pub struct Predictor {
    state: ArtifactState,
    canonical: CanonicalizeConfig,
    engine: DecisionEngine,
    recovery: Arc<RecoveryTable>,
}

impl Predictor {
    pub fn new(
        state: ArtifactState,
        canonical: CanonicalizeConfig,
        engine: DecisionEngine,
        recovery: Arc<RecoveryTable>,
    ) -> Self {
        Self {
            state,
            canonical,
            engine,
            recovery,
        }
    }

    /// Ready predictor over an already built context, default settings and
    /// the bundled recovery table.
    pub fn with_context(ctx: ModelContext) -> Result<Self, ConfigLoadError> {
        Ok(Self::new(
            ArtifactState::ready(ctx),
            CanonicalizeConfig::default(),
            DecisionEngine::default(),
            Arc::new(RecoveryTable::builtin()?),
        ))
    }

    /// Build from configuration.
    ///
    /// Artifact load failures do not fail construction: the predictor comes
    /// up degraded and answers every request with
    /// [`PredictError::ServiceUnavailable`]. Bad thresholds or an unreadable
    /// recovery table are configuration errors.
    pub fn from_config(config: &TriageConfig) -> Result<Self, ConfigLoadError> {
        config.validate()?;
        let engine = DecisionEngine::new(config.decision)
            .map_err(|err| ConfigLoadError::Validation(err.to_string()))?;
        let recovery = match &config.recovery_plans {
            Some(path) => RecoveryTable::from_file(path)?,
            None => RecoveryTable::builtin()?,
        };
        let state = ArtifactState::initialize(&config.artifacts_dir);
        Ok(Self::new(
            state,
            config.canonical.clone(),
            engine,
            Arc::new(recovery),
        ))
    }

    pub fn state(&self) -> &ArtifactState {
        &self.state
    }

    pub fn engine(&self) -> &DecisionEngine {
        &self.engine
    }

    pub fn recovery(&self) -> &RecoveryTable {
        &self.recovery
    }

    /// Run one request through the pipeline.
    pub fn predict(&self, request: &PredictRequest) -> Result<PredictResponse, PredictError> {
        let span = MetricsSpan::start();
        let result = self.run(request);
        if let Some(span) = span {
            let outcome = match &result {
                Ok((_, outcome)) => *outcome,
                Err(_) => PredictOutcome::Failed,
            };
            span.finish(outcome);
        }
        result.map(|(response, _)| response)
    }

    /// Predict many requests in parallel. Results keep input order.
    pub fn predict_batch(
        &self,
        requests: &[PredictRequest],
    ) -> Vec<Result<PredictResponse, PredictError>> {
        requests
            .par_iter()
            .map(|request| self.predict(request))
            .collect()
    }

    fn run(
        &self,
        request: &PredictRequest,
    ) -> Result<(PredictResponse, PredictOutcome), PredictError> {
        let Some(ctx) = self.state.context() else {
            tracing::debug!("prediction refused: artifacts not loaded");
            return Err(PredictError::ServiceUnavailable);
        };
        if request.symptoms.is_empty() {
            return Err(PredictError::InvalidInput);
        }

        let resolution = match canonicalize(&request.symptoms, &self.canonical) {
            Ok(doc) => self.resolve(ctx, &doc)?,
            Err(CanonicalError::EmptyInput) => {
                tracing::debug!("symptoms blank after normalization");
                Resolution::no_signal()
            }
            Err(err) => return Err(failure(Stage::Canonicalize, None, &err)),
        };
        let outcome = outcome_of(&resolution);

        let recovery = self.recovery.lookup(resolution.diagnosis.label()).clone();
        Ok((
            PredictResponse {
                disease: resolution.diagnosis.label().to_string(),
                confidence: resolution.confidence.to_string(),
                original_input: request.symptoms.clone(),
                recovery,
            },
            outcome,
        ))
    }

    fn resolve(
        &self,
        ctx: &ModelContext,
        doc: &CanonicalizedText,
    ) -> Result<Resolution, PredictError> {
        let input_hash = doc.sha256_hex.as_str();
        let tokens: Vec<&str> = doc.token_texts().collect();
        tracing::debug!(input_hash, tokens = tokens.len(), "symptoms canonicalized");

        let features = ctx
            .vectorizer()
            .transform_tokens(&tokens)
            .map_err(|err| failure(Stage::Vectorize, Some(input_hash), &err))?;
        tracing::debug!(input_hash, nnz = features.nnz(), "symptoms vectorized");

        let resolution = self
            .engine
            .decide(&features, ctx.scorer(), ctx.labels())
            .map_err(|err| failure(Stage::Decide, Some(input_hash), &err))?;
        tracing::debug!(
            input_hash,
            disease = resolution.diagnosis.label(),
            confidence = %resolution.confidence,
            "prediction resolved"
        );
        Ok(resolution)
    }
}

fn outcome_of(resolution: &Resolution) -> PredictOutcome {
    if resolution.is_no_signal() {
        PredictOutcome::NoSignal
    } else if resolution.diagnosis.is_unknown() {
        PredictOutcome::Rejected
    } else {
        PredictOutcome::Accepted
    }
}

fn failure(stage: Stage, input_hash: Option<&str>, err: &dyn std::error::Error) -> PredictError {
    tracing::error!(
        stage = stage.as_str(),
        input_hash = input_hash.unwrap_or("-"),
        error = %err,
        "prediction failed"
    );
    PredictError::ComputationFailure { stage }
}
