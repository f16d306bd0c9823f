use serde::{Deserialize, Serialize};
use unicode_categories::UnicodeCategories;

/// A token with its UTF-8 byte offsets in the canonical text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Token {
    /// The token text content.
    pub text: String,
    /// Byte offset (inclusive) in the canonical text.
    pub start: usize,
    /// Byte offset (exclusive) in the canonical text.
    pub end: usize,
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        self.text.as_str()
    }
}

/// Returns true for characters that belong to a word token: letters, digits,
/// combining marks and the underscore.
pub fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch.is_mark()
}

/// Splits canonical text into word tokens and produces byte offsets.
///
/// A word is a maximal run of [`is_word_char`] characters. Runs shorter than
/// `min_chars` characters are dropped; everything else (whitespace,
/// punctuation, symbols) acts as a delimiter. Deterministic and
/// cross-platform.
pub fn tokenize_words(text: &str, min_chars: usize) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut start: Option<(usize, usize)> = None;

    for (idx, ch) in text.char_indices() {
        if is_word_char(ch) {
            match start.as_mut() {
                Some((_, count)) => *count += 1,
                None => start = Some((idx, 1)),
            }
        } else if let Some((token_start, count)) = start.take() {
            push_word(&mut tokens, text, token_start, idx, count, min_chars);
        }
    }

    if let Some((token_start, count)) = start {
        push_word(&mut tokens, text, token_start, text.len(), count, min_chars);
    }

    tokens
}

fn push_word(
    tokens: &mut Vec<Token>,
    text: &str,
    start: usize,
    end: usize,
    char_count: usize,
    min_chars: usize,
) {
    if char_count >= min_chars {
        tokens.push(Token {
            text: text[start..end].to_string(),
            start,
            end,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn punctuation_splits_words() {
        let tokens = tokenize_words("skin-rash, itching; redness.", 2);
        assert_eq!(texts(&tokens), vec!["skin", "rash", "itching", "redness"]);
    }

    #[test]
    fn short_fragments_are_dropped() {
        let tokens = tokenize_words("a high fever x 3 days", 2);
        assert_eq!(texts(&tokens), vec!["high", "fever", "days"]);
    }

    #[test]
    fn min_chars_counts_characters_not_bytes() {
        // "né" is two characters but three bytes.
        let tokens = tokenize_words("né é", 2);
        assert_eq!(texts(&tokens), vec!["né"]);
    }

    #[test]
    fn offsets_point_into_source() {
        let text = "dry  cough_night";
        let tokens = tokenize_words(text, 1);
        assert_eq!(tokens.len(), 2);
        for token in &tokens {
            assert_eq!(&text[token.start..token.end], token.text);
        }
        assert_eq!(tokens[1].text, "cough_night");
    }
}
