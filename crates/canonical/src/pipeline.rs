use std::borrow::Cow;

use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

use crate::config::CanonicalizeConfig;
use crate::document::CanonicalizedText;
use crate::error::CanonicalError;
use crate::hash::hash_canonical_bytes;
use crate::token::tokenize_words;

/// Main entry point. Normalizes raw symptom text and splits it into word
/// tokens.
///
/// Whitespace-only input is rejected with [`CanonicalError::EmptyInput`].
/// Input that survives normalization but contains no word tokens is *not* an
/// error: it yields a document without tokens, which the vectorizer turns
/// into an all-zero feature vector.
pub fn canonicalize(
    input: &str,
    cfg: &CanonicalizeConfig,
) -> Result<CanonicalizedText, CanonicalError> {
    cfg.validate()?;

    // Unicode normalization first, it can change grapheme boundaries.
    let normalized_text: Cow<str> = if cfg.normalize_unicode {
        Cow::Owned(input.nfkc().collect::<String>())
    } else {
        Cow::Borrowed(input)
    };

    let mut canonical_text = String::with_capacity(normalized_text.len());
    let mut pending_space = false;

    for grapheme in normalized_text.graphemes(true) {
        // Lowercasing can expand one character into several.
        if cfg.lowercase {
            for lower in grapheme.to_lowercase().chars() {
                push_char(lower, &mut canonical_text, &mut pending_space);
            }
        } else {
            for ch in grapheme.chars() {
                push_char(ch, &mut canonical_text, &mut pending_space);
            }
        }
    }

    if canonical_text.is_empty() {
        return Err(CanonicalError::EmptyInput);
    }

    let tokens = tokenize_words(&canonical_text, cfg.min_token_chars);
    let sha256_hex = hash_canonical_bytes(cfg.version, canonical_text.as_bytes());

    Ok(CanonicalizedText {
        canonical_text,
        tokens,
        sha256_hex,
        canonical_version: cfg.version,
        config: cfg.clone(),
    })
}

/// Appends a character, collapsing whitespace runs into one ASCII space and
/// dropping leading and trailing whitespace.
fn push_char(ch: char, canonical_text: &mut String, pending_space: &mut bool) {
    if ch.is_whitespace() {
        if !canonical_text.is_empty() {
            *pending_space = true;
        }
        return;
    }
    if *pending_space {
        canonical_text.push(' ');
        *pending_space = false;
    }
    canonical_text.push(ch);
}
