use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use canonical::tokenize_words;
use serde::{Deserialize, Serialize};

use crate::artifact::read_json;
use crate::error::ModelError;
use crate::features::FeatureVector;
use crate::traits::Vectorizer;

/// Row normalization applied after TF-IDF weighting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    #[default]
    L2,
    None,
}

/// TF-IDF vectorizer over a fixed vocabulary.
///
/// Artifact shape (`vectorizer.json`):
///
/// ```json
/// {
///   "vocabulary": { "itching": 0, "skin rash": 1 },
///   "idf": [1.69, 2.10],
///   "ngram_max": 2,
///   "sublinear_tf": false,
///   "norm": "l2",
///   "min_token_chars": 2
/// }
/// ```
///
/// Terms are word n-grams joined by a single space. A term's weight is its
/// raw count (or `1 + ln(count)` with `sublinear_tf`) times its idf.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    #[serde(default = "default_ngram_max")]
    ngram_max: usize,
    #[serde(default)]
    sublinear_tf: bool,
    #[serde(default)]
    norm: Norm,
    #[serde(default = "default_min_token_chars")]
    min_token_chars: usize,
}

fn default_ngram_max() -> usize {
    1
}

fn default_min_token_chars() -> usize {
    2
}

impl TfidfVectorizer {
    /// Build from parts and validate.
    pub fn new(
        vocabulary: HashMap<String, usize>,
        idf: Vec<f64>,
        ngram_max: usize,
        sublinear_tf: bool,
        norm: Norm,
    ) -> Result<Self, ModelError> {
        let vectorizer = Self {
            vocabulary,
            idf,
            ngram_max,
            sublinear_tf,
            norm,
            min_token_chars: default_min_token_chars(),
        };
        vectorizer.validate()?;
        Ok(vectorizer)
    }

    /// Load and validate a `vectorizer.json` artifact.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let vectorizer: Self = read_json(path.as_ref())?;
        vectorizer.validate()?;
        Ok(vectorizer)
    }

    fn validate(&self) -> Result<(), ModelError> {
        if self.vocabulary.is_empty() {
            return Err(ModelError::InvalidArtifact(
                "vectorizer vocabulary is empty".into(),
            ));
        }
        if self.idf.len() != self.vocabulary.len() {
            return Err(ModelError::InvalidArtifact(format!(
                "vectorizer has {} idf weights for {} vocabulary terms",
                self.idf.len(),
                self.vocabulary.len()
            )));
        }
        let mut seen = vec![false; self.idf.len()];
        for (term, &index) in &self.vocabulary {
            if index >= seen.len() || seen[index] {
                return Err(ModelError::InvalidArtifact(format!(
                    "vocabulary term {term:?} has invalid or duplicate index {index}"
                )));
            }
            seen[index] = true;
        }
        if let Some(pos) = self.idf.iter().position(|w| !w.is_finite()) {
            return Err(ModelError::InvalidArtifact(format!(
                "idf weight at index {pos} is not finite"
            )));
        }
        if self.ngram_max == 0 {
            return Err(ModelError::InvalidArtifact(
                "ngram_max must be >= 1".into(),
            ));
        }
        if self.min_token_chars == 0 {
            return Err(ModelError::InvalidArtifact(
                "min_token_chars must be >= 1".into(),
            ));
        }
        Ok(())
    }

    fn term_counts(&self, words: &[&str]) -> BTreeMap<usize, u32> {
        let mut counts: BTreeMap<usize, u32> = BTreeMap::new();
        let mut gram = String::new();
        for n in 1..=self.ngram_max.min(words.len()) {
            for window in words.windows(n) {
                gram.clear();
                for (i, word) in window.iter().enumerate() {
                    if i > 0 {
                        gram.push(' ');
                    }
                    gram.push_str(word);
                }
                if let Some(&index) = self.vocabulary.get(gram.as_str()) {
                    *counts.entry(index).or_insert(0) += 1;
                }
            }
        }
        counts
    }
}

impl Vectorizer for TfidfVectorizer {
    fn dimensions(&self) -> usize {
        self.idf.len()
    }

    /// Tokenizes with the artifact's own `min_token_chars`.
    fn transform(&self, text: &str) -> Result<FeatureVector, ModelError> {
        let tokens = tokenize_words(text, self.min_token_chars);
        let words: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        self.transform_tokens(&words)
    }

    fn transform_tokens(&self, tokens: &[&str]) -> Result<FeatureVector, ModelError> {
        let counts = self.term_counts(tokens);

        let mut weighted: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(index, count)| {
                let tf = if self.sublinear_tf {
                    1.0 + f64::from(count).ln()
                } else {
                    f64::from(count)
                };
                (index, tf * self.idf[index])
            })
            .collect();

        if self.norm == Norm::L2 {
            let norm = weighted.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
            if norm > 0.0 {
                for (_, w) in weighted.iter_mut() {
                    *w /= norm;
                }
            }
        }

        FeatureVector::new(self.dimensions(), weighted)
    }
}
