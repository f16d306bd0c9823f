//! Output type of the normalization pipeline.
//!
//! For a fixed configuration version and input text every field of
//! [`CanonicalizedText`] is deterministic.
//!
//! ```rust
//! use canonical::{canonicalize, CanonicalizeConfig};
//!
//! let config = CanonicalizeConfig::default();
//! let doc = canonicalize("  Itching,   Skin RASH ", &config).unwrap();
//!
//! assert_eq!(doc.canonical_text, "itching, skin rash");
//! assert_eq!(doc.tokens.len(), 3);
//! assert_eq!(doc.tokens[2].text, "rash");
//! assert_eq!(doc.sha256_hex.len(), 64);
//! ```

use serde::{Deserialize, Serialize};

use crate::config::CanonicalizeConfig;
use crate::token::Token;

/// Normalized symptom text plus its word tokens.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CanonicalizedText {
    /// Text after Unicode normalization, casing and whitespace collapse.
    ///
    /// This is the string handed to the feature vectorizer.
    pub canonical_text: String,
    /// Word tokens with byte offsets into `canonical_text`.
    pub tokens: Vec<Token>,
    /// Version-aware identity hash of `canonical_text`.
    pub sha256_hex: String,
    /// Normalization version used.
    pub canonical_version: u32,
    /// Configuration snapshot.
    pub config: CanonicalizeConfig,
}

impl CanonicalizedText {
    /// Token texts in order.
    pub fn token_texts(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(|t| t.text.as_str())
    }

    /// True when normalization left no word tokens at all, e.g. "?!" or "x".
    pub fn has_words(&self) -> bool {
        !self.tokens.is_empty()
    }
}
