//! Canonical symptom text layer.
//!
//! Turns free-form symptom descriptions into a deterministic canonical string
//! and a stream of word tokens for the feature vectorizer.
//!
//! ## What we do
//!
//! - Unicode normalization (NFKC by default, configurable)
//! - Locale-free lowercasing
//! - Whitespace collapse and trimming
//! - Word tokenization with byte offsets (letters, digits, marks, `_`)
//! - A versioned SHA-256 of the canonical text for log correlation
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock calls, no locale dependence. Same text and config, same
//! result on any machine.

mod config;
mod document;
mod error;
mod hash;
mod pipeline;
mod token;

pub use crate::config::CanonicalizeConfig;
pub use crate::document::CanonicalizedText;
pub use crate::error::CanonicalError;
pub use crate::hash::hash_canonical_bytes;
pub use crate::pipeline::canonicalize;
pub use crate::token::{is_word_char, tokenize_words, Token};
