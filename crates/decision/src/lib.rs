//! # Triage decision engine (`decision`)
//!
//! ## Purpose
//!
//! `decision` turns raw per-class classifier scores into a diagnosis the
//! caller can report, or into the sentinel [`UNKNOWN_CONDITION`] when the
//! evidence is too weak. It owns the only real decision logic of the triage
//! pipeline:
//!
//! 1. **Confidence normalizer** ([`softmax`]): max-shifted softmax over the
//!    decision scores.
//! 2. **Unknown detector** ([`detect_unknown`]): rejects when the top
//!    confidence is below `percent_threshold` *or* the gap between the two
//!    highest scores is below `margin_threshold`.
//! 3. **Diagnosis resolver** ([`resolve_diagnosis`], [`Resolution::no_signal`]):
//!    maps an accepted decision to its label. An all-zero feature vector skips
//!    scoring entirely and reports exactly `"0%"`.
//!
//! [`DecisionEngine`] wires the three together behind the collaborator traits
//! from the `model` crate.
//!
//! ## Example Usage
//!
//! ```
//! use decision::{DecisionConfig, DecisionEngine};
//! use model::{LabelEncoder, ScoreVector};
//!
//! let engine = DecisionEngine::new(DecisionConfig::default()).unwrap();
//! let labels = LabelEncoder::new(vec![
//!     "Fungal Infection".into(),
//!     "Allergy".into(),
//!     "GERD".into(),
//!     "Acne".into(),
//! ])
//! .unwrap();
//!
//! let accepted = engine
//!     .decide_scores(&ScoreVector::new(vec![2.1, 0.3, -1.0, 0.5]), &labels)
//!     .unwrap();
//! assert_eq!(accepted.diagnosis.label(), "Fungal Infection");
//! assert_eq!(accepted.confidence.to_string(), "70.8%");
//!
//! let rejected = engine
//!     .decide_scores(&ScoreVector::new(vec![1.0, 0.95, 0.90, -3.0]), &labels)
//!     .unwrap();
//! assert_eq!(rejected.diagnosis.label(), "Unknown Condition");
//! ```

pub mod config;
pub mod detector;
pub mod engine;
pub mod error;
pub mod normalize;
pub mod resolver;

pub use crate::config::DecisionConfig;
pub use crate::detector::{detect_unknown, score_margin, Decision};
pub use crate::engine::DecisionEngine;
pub use crate::error::DecisionError;
pub use crate::normalize::{softmax, ConfidenceDistribution};
pub use crate::resolver::{
    format_confidence, resolve_diagnosis, ConfidenceReport, Diagnosis, Resolution,
    UNKNOWN_CONDITION,
};
