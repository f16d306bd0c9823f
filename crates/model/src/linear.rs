use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::artifact::read_json;
use crate::error::ModelError;
use crate::features::{FeatureVector, ScoreVector};
use crate::traits::ScoreProducer;

/// One-vs-rest linear classifier (e.g. a linear SVM).
///
/// Scores are decision-function margins `coef[c] · x + intercept[c]`, not
/// probabilities. Artifact shape (`classifier.json`):
///
/// ```json
/// { "coef": [[0.5, -1.0], [0.0, 2.0]], "intercept": [-0.1, 0.2] }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinearClassifier {
    coef: Vec<Vec<f64>>,
    intercept: Vec<f64>,
}

impl LinearClassifier {
    pub fn new(coef: Vec<Vec<f64>>, intercept: Vec<f64>) -> Result<Self, ModelError> {
        let classifier = Self { coef, intercept };
        classifier.validate()?;
        Ok(classifier)
    }

    /// Load and validate a `classifier.json` artifact.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let classifier: Self = read_json(path.as_ref())?;
        classifier.validate()?;
        Ok(classifier)
    }

    fn validate(&self) -> Result<(), ModelError> {
        let Some(first) = self.coef.first() else {
            return Err(ModelError::InvalidArtifact(
                "classifier has no coefficient rows".into(),
            ));
        };
        let dims = first.len();
        if dims == 0 {
            return Err(ModelError::InvalidArtifact(
                "classifier coefficient rows are empty".into(),
            ));
        }
        for (class, row) in self.coef.iter().enumerate() {
            if row.len() != dims {
                return Err(ModelError::InvalidArtifact(format!(
                    "coefficient row {class} has {} weights, expected {dims}",
                    row.len()
                )));
            }
            if row.iter().any(|w| !w.is_finite()) {
                return Err(ModelError::InvalidArtifact(format!(
                    "coefficient row {class} contains a non-finite weight"
                )));
            }
        }
        if self.intercept.len() != self.coef.len() {
            return Err(ModelError::InvalidArtifact(format!(
                "classifier has {} intercepts for {} classes",
                self.intercept.len(),
                self.coef.len()
            )));
        }
        if self.intercept.iter().any(|b| !b.is_finite()) {
            return Err(ModelError::InvalidArtifact(
                "classifier intercept is not finite".into(),
            ));
        }
        Ok(())
    }
}

impl ScoreProducer for LinearClassifier {
    fn dimensions(&self) -> usize {
        self.coef.first().map_or(0, Vec::len)
    }

    fn num_classes(&self) -> usize {
        self.coef.len()
    }

    fn decision_scores(&self, features: &FeatureVector) -> Result<ScoreVector, ModelError> {
        if features.dims() != self.dimensions() {
            return Err(ModelError::DimensionMismatch {
                expected: self.dimensions(),
                found: features.dims(),
            });
        }
        let scores = self
            .coef
            .iter()
            .zip(&self.intercept)
            .map(|(row, bias)| features.dot(row).map(|dot| dot + bias))
            .collect::<Result<Vec<f64>, ModelError>>()?;
        Ok(ScoreVector::new(scores))
    }
}
