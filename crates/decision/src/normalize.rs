//! Confidence normalizer: raw decision scores to a probability-like
//! distribution.

use model::ScoreVector;
use serde::Serialize;

use crate::error::DecisionError;

/// Softmax output, index-aligned with the scores it came from.
///
/// Every element is in `[0, 1]` and the elements sum to 1 within floating
/// point tolerance.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ConfidenceDistribution(Vec<f64>);

impl ConfidenceDistribution {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Index and value of the highest confidence.
    ///
    /// Ties resolve to the lowest index. `None` only for an empty
    /// distribution, which [`softmax`] never produces.
    pub fn argmax(&self) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        for (index, &value) in self.0.iter().enumerate() {
            match best {
                Some((_, top)) if value <= top => {}
                _ => best = Some((index, value)),
            }
        }
        best
    }
}

/// Numerically stable softmax.
///
/// The maximum score is subtracted before exponentiating, so large scores do
/// not overflow and adding a constant to every score leaves the result
/// unchanged. The input is not modified.
///
/// Fails with [`DecisionError::TooFewClasses`] for fewer than two scores and
/// [`DecisionError::NonFiniteScore`] if any score is NaN or infinite.
pub fn softmax(scores: &ScoreVector) -> Result<ConfidenceDistribution, DecisionError> {
    let values = scores.as_slice();
    check_scores(values)?;

    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = values.iter().map(|s| (s - max).exp()).collect();
    // The max element contributes exp(0) = 1, so the sum is >= 1.
    let sum: f64 = exps.iter().sum();

    Ok(ConfidenceDistribution(
        exps.into_iter().map(|e| e / sum).collect(),
    ))
}

pub(crate) fn check_scores(values: &[f64]) -> Result<(), DecisionError> {
    if values.len() < 2 {
        return Err(DecisionError::TooFewClasses {
            found: values.len(),
        });
    }
    if let Some(index) = values.iter().position(|s| !s.is_finite()) {
        return Err(DecisionError::NonFiniteScore { index });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn scores(values: &[f64]) -> ScoreVector {
        ScoreVector::new(values.to_vec())
    }

    #[test]
    fn known_distribution() {
        let dist = softmax(&scores(&[2.1, 0.3, -1.0, 0.5])).expect("softmax");
        let expected = [0.708_092_6, 0.117_046_9, 0.031_899_0, 0.142_961_4];
        for (got, want) in dist.as_slice().iter().zip(expected) {
            assert!((got - want).abs() < 1e-6, "{got} vs {want}");
        }
    }

    #[test]
    fn large_scores_do_not_overflow() {
        let dist = softmax(&scores(&[1000.0, 999.0, -1000.0])).expect("softmax");
        assert!(dist.as_slice().iter().all(|p| p.is_finite()));
        assert!((dist.as_slice()[0] - 0.731_058_6).abs() < 1e-6);
    }

    #[test]
    fn equal_scores_are_uniform() {
        let dist = softmax(&scores(&[0.0, 0.0, 0.0, 0.0])).expect("softmax");
        assert!(dist.as_slice().iter().all(|p| (p - 0.25).abs() < 1e-12));
    }

    #[test]
    fn input_is_not_mutated() {
        let input = scores(&[3.0, 1.0]);
        let before = input.clone();
        softmax(&input).expect("softmax");
        assert_eq!(input, before);
    }

    #[test]
    fn fewer_than_two_scores_rejected() {
        assert!(matches!(
            softmax(&scores(&[1.0])),
            Err(DecisionError::TooFewClasses { found: 1 })
        ));
        assert!(matches!(
            softmax(&scores(&[])),
            Err(DecisionError::TooFewClasses { found: 0 })
        ));
    }

    #[test]
    fn non_finite_scores_rejected() {
        assert!(matches!(
            softmax(&scores(&[1.0, f64::INFINITY])),
            Err(DecisionError::NonFiniteScore { index: 1 })
        ));
        assert!(matches!(
            softmax(&scores(&[f64::NAN, 1.0])),
            Err(DecisionError::NonFiniteScore { index: 0 })
        ));
    }

    #[test]
    fn argmax_prefers_lowest_index_on_ties() {
        let dist = softmax(&scores(&[0.5, 2.0, 2.0, 1.0])).expect("softmax");
        assert_eq!(dist.argmax().map(|(i, _)| i), Some(1));
    }

    proptest! {
        #[test]
        fn sums_to_one_and_stays_in_range(
            values in prop::collection::vec(-50.0f64..50.0, 2..16)
        ) {
            let dist = softmax(&ScoreVector::new(values)).unwrap();
            let sum: f64 = dist.as_slice().iter().sum();
            prop_assert!((sum - 1.0).abs() < 1e-6);
            prop_assert!(dist.as_slice().iter().all(|p| (0.0..=1.0).contains(p)));
        }

        #[test]
        fn invariant_under_constant_shift(
            values in prop::collection::vec(-50.0f64..50.0, 2..16),
            shift in -100.0f64..100.0,
        ) {
            let base = softmax(&ScoreVector::new(values.clone())).unwrap();
            let shifted = softmax(&ScoreVector::new(
                values.iter().map(|v| v + shift).collect(),
            ))
            .unwrap();
            for (a, b) in base.as_slice().iter().zip(shifted.as_slice()) {
                prop_assert!((a - b).abs() < 1e-9);
            }
        }

        #[test]
        fn preserves_unique_argmax(
            values in prop::collection::vec(-50.0f64..50.0, 2..16)
        ) {
            let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let score_argmax = values.iter().position(|v| *v == max).unwrap();
            let runner_up = values
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != score_argmax)
                .map(|(_, v)| *v)
                .fold(f64::NEG_INFINITY, f64::max);
            // Gaps below f64 resolution collapse to a tie after exp().
            prop_assume!(max - runner_up > 1e-9);

            let dist = softmax(&ScoreVector::new(values)).unwrap();
            prop_assert_eq!(dist.argmax().map(|(i, _)| i), Some(score_argmax));
        }
    }
}
