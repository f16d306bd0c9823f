//! Unknown detector: the dual-threshold rejection rule.

use model::ScoreVector;
use serde::Serialize;

use crate::config::DecisionConfig;
use crate::error::DecisionError;
use crate::normalize::{check_scores, ConfidenceDistribution};

/// Outcome of the unknown detector for one request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Decision {
    /// Index of the highest confidence (lowest index on ties).
    pub best_index: usize,
    /// Confidence of `best_index`.
    pub confidence: f64,
    /// Highest minus second-highest raw score.
    pub margin: f64,
    /// True when both thresholds pass.
    pub accepted: bool,
}

/// Gap between the two highest scores.
pub fn score_margin(scores: &ScoreVector) -> Result<f64, DecisionError> {
    let values = scores.as_slice();
    check_scores(values)?;

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| b.total_cmp(a));
    Ok(sorted[0] - sorted[1])
}

/// Decide whether the top class is trustworthy.
///
/// Rejects when `confidence < percent_threshold` **or**
/// `margin < margin_threshold`. The margin check catches two near-equal top
/// scores even when a third, much lower class inflates the top softmax value.
pub fn detect_unknown(
    scores: &ScoreVector,
    confidences: &ConfidenceDistribution,
    cfg: &DecisionConfig,
) -> Result<Decision, DecisionError> {
    if scores.len() != confidences.len() {
        return Err(DecisionError::LengthMismatch {
            scores: scores.len(),
            confidences: confidences.len(),
        });
    }
    let margin = score_margin(scores)?;
    let (best_index, confidence) = confidences
        .argmax()
        .ok_or(DecisionError::TooFewClasses { found: 0 })?;

    let accepted = confidence >= cfg.percent_threshold && margin >= cfg.margin_threshold;

    Ok(Decision {
        best_index,
        confidence,
        margin,
        accepted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::softmax;

    fn decide(values: &[f64], cfg: &DecisionConfig) -> Decision {
        let scores = ScoreVector::new(values.to_vec());
        let dist = softmax(&scores).expect("softmax");
        detect_unknown(&scores, &dist, cfg).expect("decision")
    }

    #[test]
    fn clear_winner_is_accepted() {
        let d = decide(&[2.1, 0.3, -1.0, 0.5], &DecisionConfig::default());
        assert!(d.accepted);
        assert_eq!(d.best_index, 0);
        assert!((d.margin - 1.6).abs() < 1e-12);
        assert!((d.confidence - 0.708_092_6).abs() < 1e-6);
    }

    #[test]
    fn narrow_margin_is_rejected() {
        let d = decide(&[1.0, 0.95, 0.90], &DecisionConfig::default());
        assert!(!d.accepted);
        assert_eq!(d.best_index, 0);
        assert!((d.margin - 0.05).abs() < 1e-12);
    }

    #[test]
    fn narrow_margin_rejected_even_with_high_confidence() {
        // Two close leaders far above the rest: top confidence ~0.5 clears a
        // 40% threshold but the margin does not.
        let d = decide(&[5.0, 4.8, -5.0, -5.0], &DecisionConfig::default());
        assert!(d.confidence > 0.40);
        assert!(!d.accepted);
    }

    #[test]
    fn low_confidence_is_rejected_despite_margin() {
        // Margin 0.6 passes, but ten trailing classes dilute the top class.
        let mut values = vec![0.6];
        values.extend(std::iter::repeat(0.0).take(10));
        let d = decide(&values, &DecisionConfig::default());
        assert!(d.margin >= 0.5);
        assert!(d.confidence < 0.40);
        assert!(!d.accepted);
    }

    #[test]
    fn equal_scores_always_rejected() {
        for percent in [0.0, 0.1, 0.4, 1.0] {
            let cfg = DecisionConfig::default().with_percent_threshold(percent);
            let d = decide(&[0.7, 0.7, 0.7], &cfg);
            assert_eq!(d.margin, 0.0);
            assert!(!d.accepted, "percent_threshold {percent}");
            assert_eq!(d.best_index, 0);
        }
    }

    #[test]
    fn thresholds_are_inclusive() {
        // Margin exactly 0.5 with a 0.5 threshold passes the margin check.
        let cfg = DecisionConfig::default().with_percent_threshold(0.0);
        let d = decide(&[1.0, 0.5], &cfg);
        assert_eq!(d.margin, 0.5);
        assert!(d.accepted);
    }

    #[test]
    fn tunable_thresholds_change_the_outcome() {
        let strict = DecisionConfig::default().with_margin_threshold(2.0);
        assert!(!decide(&[2.1, 0.3, -1.0, 0.5], &strict).accepted);

        let lenient = DecisionConfig::default().with_margin_threshold(0.01);
        assert!(!decide(&[1.0, 0.95, 0.90], &lenient).accepted);

        let lenient = lenient.with_percent_threshold(0.30);
        assert!(decide(&[1.0, 0.95, 0.90], &lenient).accepted);
    }

    #[test]
    fn tie_on_top_picks_lowest_index() {
        let cfg = DecisionConfig::default().with_margin_threshold(0.0);
        let d = decide(&[-1.0, 3.0, 3.0], &cfg);
        assert_eq!(d.best_index, 1);
    }

    #[test]
    fn mismatched_lengths_rejected() {
        let scores = ScoreVector::new(vec![1.0, 2.0, 3.0]);
        let dist = softmax(&ScoreVector::new(vec![1.0, 2.0])).expect("softmax");
        assert!(matches!(
            detect_unknown(&scores, &dist, &DecisionConfig::default()),
            Err(DecisionError::LengthMismatch {
                scores: 3,
                confidences: 2
            })
        ));
    }

    #[test]
    fn margin_needs_two_classes() {
        assert!(matches!(
            score_margin(&ScoreVector::new(vec![4.0])),
            Err(DecisionError::TooFewClasses { found: 1 })
        ));
    }
}
