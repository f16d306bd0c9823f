//! Workspace umbrella crate for the symptom triage engine.
//!
//! Stitches the member crates into a single request pipeline:
//!
//! ```text
//! symptoms ─▶ canonical ─▶ model::Vectorizer ─▶ decision::DecisionEngine ─▶ recovery
//! ```
//!
//! [`Predictor`] owns the loaded artifacts, thresholds and recovery table and
//! answers [`PredictRequest`]s with a [`PredictResponse`] or a
//! [`PredictError`]. "Unknown Condition" is a successful response, not an
//! error.
//!
//! ```no_run
//! use triage::{PredictRequest, Predictor, TriageConfig};
//!
//! let config = TriageConfig::from_file("triage.yaml")?;
//! let predictor = Predictor::from_config(&config)?;
//! match predictor.predict(&PredictRequest::new("itching skin rash")) {
//!     Ok(response) => println!("{} ({})", response.disease, response.confidence),
//!     Err(err) => eprintln!("{err}"),
//! }
//! # Ok::<(), triage::ConfigLoadError>(())
//! ```

pub mod config;
pub mod metrics;
mod predict;

pub use canonical::{CanonicalError, CanonicalizeConfig, CanonicalizedText, canonicalize};
pub use decision::{
    ConfidenceDistribution, ConfidenceReport, Decision, DecisionConfig, DecisionEngine,
    DecisionError, Diagnosis, Resolution, UNKNOWN_CONDITION, detect_unknown, format_confidence,
    resolve_diagnosis, score_margin, softmax,
};
pub use model::{
    ArtifactState, FeatureVector, LabelEncoder, LabelTable, LinearClassifier, ModelContext,
    ModelError, Norm, ScoreProducer, ScoreVector, TfidfVectorizer, Vectorizer,
};
pub use recovery::{RecoveryError, RecoveryPlan, RecoveryTable};

pub use crate::config::{ConfigLoadError, TriageConfig};
pub use crate::metrics::{PredictMetrics, PredictOutcome, set_predict_metrics};
pub use crate::predict::{
    ErrorResponse, PredictError, PredictReply, PredictRequest, PredictResponse, Predictor, Stage,
};
