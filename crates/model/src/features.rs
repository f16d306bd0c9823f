use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Sparse feature vector over a fixed vocabulary.
///
/// Entries are kept sorted by index with explicit zeros removed, so
/// [`FeatureVector::nnz`] is the number of recognized vocabulary terms that
/// carry weight. An all-zero vector is a valid value meaning "no signal".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    dims: usize,
    entries: Vec<(usize, f64)>,
}

impl FeatureVector {
    /// Build a vector from `(index, value)` pairs in any order.
    ///
    /// Duplicate indices are summed. Indices must be below `dims` and values
    /// must be finite.
    pub fn new(
        dims: usize,
        entries: impl IntoIterator<Item = (usize, f64)>,
    ) -> Result<Self, ModelError> {
        let mut collected: Vec<(usize, f64)> = Vec::new();
        for (index, value) in entries {
            if index >= dims {
                return Err(ModelError::FeatureOutOfRange { index, dims });
            }
            if !value.is_finite() {
                return Err(ModelError::NonFiniteFeature { index });
            }
            collected.push((index, value));
        }
        collected.sort_by_key(|(index, _)| *index);

        let mut entries: Vec<(usize, f64)> = Vec::with_capacity(collected.len());
        for (index, value) in collected {
            match entries.last_mut() {
                Some((last, acc)) if *last == index => *acc += value,
                _ => entries.push((index, value)),
            }
        }
        entries.retain(|(_, value)| *value != 0.0);

        Ok(Self { dims, entries })
    }

    /// The all-zero vector.
    pub fn zeros(dims: usize) -> Self {
        Self {
            dims,
            entries: Vec::new(),
        }
    }

    /// Build a sparse vector from a dense slice.
    pub fn from_dense(values: &[f64]) -> Result<Self, ModelError> {
        Self::new(values.len(), values.iter().copied().enumerate())
    }

    pub fn dims(&self) -> usize {
        self.dims
    }

    /// Number of non-zero entries.
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    /// Non-zero entries in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn to_dense(&self) -> Vec<f64> {
        let mut dense = vec![0.0; self.dims];
        for (index, value) in self.iter() {
            dense[index] = value;
        }
        dense
    }

    /// Dot product with a dense weight row of the same dimensionality.
    pub fn dot(&self, weights: &[f64]) -> Result<f64, ModelError> {
        if weights.len() != self.dims {
            return Err(ModelError::DimensionMismatch {
                expected: weights.len(),
                found: self.dims,
            });
        }
        Ok(self
            .iter()
            .map(|(index, value)| weights[index] * value)
            .sum())
    }
}

/// Raw per-class decision scores, index-aligned with the label table.
///
/// Order is class-index order, not magnitude order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreVector(Vec<f64>);

impl ScoreVector {
    pub fn new(scores: Vec<f64>) -> Self {
        Self(scores)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

impl From<Vec<f64>> for ScoreVector {
    fn from(scores: Vec<f64>) -> Self {
        Self(scores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_sorted_merged_and_zero_free() {
        let v = FeatureVector::new(5, vec![(3, 1.0), (1, 0.5), (3, 0.25), (4, 0.0)])
            .expect("valid vector");
        assert_eq!(v.iter().collect::<Vec<_>>(), vec![(1, 0.5), (3, 1.25)]);
        assert_eq!(v.nnz(), 2);
        assert_eq!(v.to_dense(), vec![0.0, 0.5, 0.0, 1.25, 0.0]);
    }

    #[test]
    fn cancelling_duplicates_leave_zero_vector() {
        let v = FeatureVector::new(3, vec![(2, 0.5), (2, -0.5)]).expect("valid vector");
        assert!(v.is_zero());
    }

    #[test]
    fn out_of_range_index_rejected() {
        let err = FeatureVector::new(2, vec![(2, 1.0)]).unwrap_err();
        assert!(matches!(
            err,
            ModelError::FeatureOutOfRange { index: 2, dims: 2 }
        ));
    }

    #[test]
    fn non_finite_value_rejected() {
        let err = FeatureVector::from_dense(&[0.0, f64::NAN]).unwrap_err();
        assert!(matches!(err, ModelError::NonFiniteFeature { index: 1 }));
    }

    #[test]
    fn dot_checks_dimensions() {
        let v = FeatureVector::from_dense(&[1.0, 0.0, 2.0]).expect("valid vector");
        assert_eq!(v.dot(&[0.5, 9.0, 1.0]).expect("same dims"), 2.5);
        assert!(matches!(
            v.dot(&[1.0, 1.0]),
            Err(ModelError::DimensionMismatch {
                expected: 2,
                found: 3
            })
        ));
    }
}
