//! Configuration types for symptom text normalization.
//!
//! [`CanonicalizeConfig`] controls how free-form symptom text is normalized
//! before it reaches the feature vectorizer.
//!
//! # Versioning
//!
//! The `version` field tracks normalization behavior. A vectorizer artifact is
//! built against one normalization; any change that alters the canonical text
//! or the token stream must bump the version so mismatches are visible in logs
//! and in the input hash.
//!
//! # Examples
//!
//! ```rust
//! use canonical::CanonicalizeConfig;
//!
//! let config = CanonicalizeConfig::default();
//! assert_eq!(config.version, 1);
//! assert!(config.normalize_unicode);
//! assert!(config.lowercase);
//! assert_eq!(config.min_token_chars, 2);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::CanonicalError;

/// Configuration for the symptom normalization pipeline.
///
/// ```json
/// {
///   "version": 1,
///   "normalize_unicode": true,
///   "lowercase": true,
///   "min_token_chars": 2
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CanonicalizeConfig {
    /// Version of the normalization behavior. Must be >= 1.
    pub version: u32,

    /// Apply Unicode NFKC normalization before other transforms.
    ///
    /// Composed and decomposed forms of the same character ("é" vs "e" +
    /// U+0301) then map to the same vocabulary term.
    pub normalize_unicode: bool,

    /// Apply locale-free Unicode lowercasing.
    ///
    /// Vectorizer vocabularies are lowercase, so disabling this is only
    /// useful with a case-sensitive artifact.
    pub lowercase: bool,

    /// Minimum number of characters for a word token.
    ///
    /// The default of 2 drops single-letter fragments ("a", "x") the same
    /// way the usual TF-IDF word pattern does.
    pub min_token_chars: usize,
}

impl CanonicalizeConfig {
    /// Check the configuration invariants.
    pub fn validate(&self) -> Result<(), CanonicalError> {
        if self.version == 0 {
            return Err(CanonicalError::InvalidConfig(
                "config version must be >= 1".into(),
            ));
        }
        if self.min_token_chars == 0 {
            return Err(CanonicalError::InvalidConfig(
                "min_token_chars must be >= 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for CanonicalizeConfig {
    fn default() -> Self {
        Self {
            version: 1,
            normalize_unicode: true,
            lowercase: true,
            min_token_chars: 2,
        }
    }
}
