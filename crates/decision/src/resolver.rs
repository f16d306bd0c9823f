//! Diagnosis resolver: turns a decision into a reportable label.

use std::fmt;

use model::LabelTable;
use serde::{Serialize, Serializer};

use crate::detector::Decision;
use crate::error::DecisionError;

/// Sentinel label reported when the engine declines to name a disease.
pub const UNKNOWN_CONDITION: &str = "Unknown Condition";

/// Resolved diagnosis: a known class label or the rejection sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnosis {
    Known(String),
    Unknown,
}

impl Diagnosis {
    /// Label as reported to callers.
    pub fn label(&self) -> &str {
        match self {
            Diagnosis::Known(name) => name.as_str(),
            Diagnosis::Unknown => UNKNOWN_CONDITION,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Diagnosis::Unknown)
    }
}

impl fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Diagnosis {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Confidence attached to a resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfidenceReport {
    /// No vocabulary term matched; reported as exactly `"0%"`.
    NoSignal,
    /// Softmax confidence of the top class in `[0, 1]`.
    Computed(f64),
}

impl ConfidenceReport {
    pub fn value(&self) -> f64 {
        match self {
            ConfidenceReport::NoSignal => 0.0,
            ConfidenceReport::Computed(value) => *value,
        }
    }
}

impl fmt::Display for ConfidenceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfidenceReport::NoSignal => f.write_str("0%"),
            ConfidenceReport::Computed(value) => f.write_str(&format_confidence(*value)),
        }
    }
}

impl Serialize for ConfidenceReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Format a confidence in `[0, 1]` as a percentage with one decimal,
/// e.g. `0.7081` -> `"70.8%"`.
pub fn format_confidence(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

/// Final diagnosis with the confidence that backs it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resolution {
    pub diagnosis: Diagnosis,
    pub confidence: ConfidenceReport,
    /// Detector outcome; `None` on the no-signal path, which never scores.
    #[serde(skip)]
    pub decision: Option<Decision>,
}

impl Resolution {
    /// Resolution for an all-zero feature vector.
    pub fn no_signal() -> Self {
        Self {
            diagnosis: Diagnosis::Unknown,
            confidence: ConfidenceReport::NoSignal,
            decision: None,
        }
    }

    pub fn is_no_signal(&self) -> bool {
        self.decision.is_none()
    }
}

/// Resolve a detector decision against the label table.
///
/// A rejected decision yields [`Diagnosis::Unknown`] but keeps its computed
/// confidence. An accepted one is looked up at `best_index`.
pub fn resolve_diagnosis(
    decision: &Decision,
    labels: &dyn LabelTable,
) -> Result<Resolution, DecisionError> {
    let diagnosis = if decision.accepted {
        Diagnosis::Known(labels.name_of(decision.best_index)?.to_string())
    } else {
        Diagnosis::Unknown
    };
    Ok(Resolution {
        diagnosis,
        confidence: ConfidenceReport::Computed(decision.confidence),
        decision: Some(*decision),
    })
}
