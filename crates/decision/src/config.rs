use serde::{Deserialize, Serialize};

use crate::error::DecisionError;

/// Rejection thresholds for the unknown detector.
///
/// A prediction is accepted only when the top softmax confidence is at least
/// `percent_threshold` **and** the gap between the two highest raw scores is
/// at least `margin_threshold`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DecisionConfig {
    /// Minimum top-class confidence in `[0, 1]`.
    #[serde(default = "DecisionConfig::default_percent_threshold")]
    pub percent_threshold: f64,
    /// Minimum gap between the two highest decision scores.
    #[serde(default = "DecisionConfig::default_margin_threshold")]
    pub margin_threshold: f64,
}

impl DecisionConfig {
    pub const DEFAULT_PERCENT_THRESHOLD: f64 = 0.40;
    pub const DEFAULT_MARGIN_THRESHOLD: f64 = 0.5;

    pub(crate) fn default_percent_threshold() -> f64 {
        Self::DEFAULT_PERCENT_THRESHOLD
    }

    pub(crate) fn default_margin_threshold() -> f64 {
        Self::DEFAULT_MARGIN_THRESHOLD
    }

    pub fn with_percent_threshold(mut self, threshold: f64) -> Self {
        self.percent_threshold = threshold;
        self
    }

    pub fn with_margin_threshold(mut self, threshold: f64) -> Self {
        self.margin_threshold = threshold;
        self
    }

    pub fn validate(&self) -> Result<(), DecisionError> {
        if !(self.percent_threshold.is_finite()
            && (0.0..=1.0).contains(&self.percent_threshold))
        {
            return Err(DecisionError::InvalidConfig(
                "percent_threshold must be between 0.0 and 1.0".into(),
            ));
        }
        if !(self.margin_threshold.is_finite() && self.margin_threshold >= 0.0) {
            return Err(DecisionError::InvalidConfig(
                "margin_threshold must be a finite value >= 0.0".into(),
            ));
        }
        Ok(())
    }
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            percent_threshold: Self::DEFAULT_PERCENT_THRESHOLD,
            margin_threshold: Self::DEFAULT_MARGIN_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_thresholds() {
        let cfg = DecisionConfig::default();
        assert_eq!(cfg.percent_threshold, 0.40);
        assert_eq!(cfg.margin_threshold, 0.5);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn missing_fields_take_defaults() {
        let cfg: DecisionConfig =
            serde_json::from_str(r#"{ "margin_threshold": 1.25 }"#).expect("parse");
        assert_eq!(cfg.percent_threshold, 0.40);
        assert_eq!(cfg.margin_threshold, 1.25);
    }

    #[test]
    fn out_of_range_thresholds_rejected() {
        for cfg in [
            DecisionConfig::default().with_percent_threshold(1.5),
            DecisionConfig::default().with_percent_threshold(-0.1),
            DecisionConfig::default().with_percent_threshold(f64::NAN),
            DecisionConfig::default().with_margin_threshold(-1.0),
            DecisionConfig::default().with_margin_threshold(f64::INFINITY),
        ] {
            assert!(
                matches!(cfg.validate(), Err(DecisionError::InvalidConfig(_))),
                "{cfg:?} should be rejected"
            );
        }
    }
}
