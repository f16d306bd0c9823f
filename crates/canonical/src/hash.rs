//! Hashing utilities for canonical symptom text.
//!
//! Symptom text is personal health data, so log lines carry a version-aware
//! digest of the canonical text instead of the text itself.
//!
//! ```text
//! SHA-256(version.to_be_bytes() || 0x00 || canonical_text_bytes)
//! ```
//!
//! ```rust
//! use canonical::hash_canonical_bytes;
//!
//! assert_eq!(hash_canonical_bytes(1, b"fever").len(), 64);
//! assert_ne!(hash_canonical_bytes(1, b"fever"), hash_canonical_bytes(2, b"fever"));
//! ```

use sha2::{Digest, Sha256};

/// Compute the identity hash of canonical text under a normalization version.
pub fn hash_canonical_bytes(canonical_version: u32, text_bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(canonical_version.to_be_bytes());
    hasher.update([0u8]);
    hasher.update(text_bytes);
    hex::encode(hasher.finalize())
}
