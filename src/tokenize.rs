// Copyright 2025-present Agora Platform Contributors
// SPDX-License-Identifier: Apache-2.0

//! Query and content tokenization.
//!
//! One normalization path for everything: queries and indexed content go
//! through the same `normalize()`, so "Café" in a document and "cafe" in a
//! query land on the same term. Tokenization is a pure function of its
//! input - no tenant state, no clock, no I/O - which is what makes search
//! responses reproducible for a fixed snapshot.
//!
//! Stop words are flagged, never dropped. The retriever decides what to do
//! with them ("the who" is all stop words and still has to match).

use crate::types::Token;
use std::collections::HashSet;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

/// Multilingual stop words loaded from data/stop_words.txt.
///
/// These words are too common to carry ranking signal on their own and
/// cause false positives in fuzzy matching (e.g. "land" is one edit from
/// "and"). The list covers English, Spanish, French, and German - the
/// languages active tenants publish in.
static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    include_str!("../data/stop_words.txt")
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect()
});

/// Check if a normalized word is a stop word.
#[inline]
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word)
}

/// Normalize a string for search: strip diacritics, lowercase, collapse
/// whitespace.
///
/// This enables matching between ASCII and accented spellings:
/// - "Café" → "cafe"
/// - "Fête du Village" → "fete du village"
/// - "naïve" → "naive"
///
/// # Algorithm
///
/// 1. NFD normalize (decompose characters into base + combining marks)
/// 2. Filter out combining marks (category Mn = Mark, Nonspacing)
/// 3. Lowercase
/// 4. Collapse whitespace
pub fn normalize(value: &str) -> String {
    value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Check if a character is a combining mark (diacritic).
///
/// Combining marks have Unicode category "Mn" (Mark, Nonspacing).
/// Examples: ́ (acute), ̈ (diaeresis), ̃ (tilde)
fn is_combining_mark(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036F}' |  // Combining Diacritical Marks
        '\u{1DC0}'..='\u{1DFF}' |  // Combining Diacritical Marks Supplement
        '\u{20D0}'..='\u{20FF}' |  // Combining Diacritical Marks for Symbols
        '\u{FE20}'..='\u{FE2F}'    // Combining Half Marks
    )
}

/// Word boundary detection: anything non-alphanumeric separates words.
#[inline]
fn is_word_boundary(c: char) -> bool {
    !c.is_alphanumeric()
}

/// Tokenize raw text into normalized tokens with their byte spans.
///
/// Each token records the `start..end` byte range it occupied in the raw
/// input, whether it is a stop word, and (initially zero) its tenant
/// corpus weight. Empty or whitespace-only input yields an empty sequence.
///
/// Deterministic and side-effect-free; the same input always produces the
/// same token sequence.
pub fn tokenize(raw: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let chars: Vec<char> = raw.chars().collect();
    let mut i = 0;
    let mut byte_offset = 0;

    while i < chars.len() {
        // Skip separators
        while i < chars.len() && is_word_boundary(chars[i]) {
            byte_offset += chars[i].len_utf8();
            i += 1;
        }
        if i >= chars.len() {
            break;
        }

        let word_start = byte_offset;
        let word_char_start = i;
        while i < chars.len() && !is_word_boundary(chars[i]) {
            byte_offset += chars[i].len_utf8();
            i += 1;
        }

        let word: String = chars[word_char_start..i].iter().collect();
        let normalized = normalize(&word);

        // Normalization can empty a token (pure combining marks); drop those
        if !normalized.is_empty() {
            let stop = is_stop_word(&normalized);
            tokens.push(Token::new(normalized, word_start, byte_offset, stop));
        }
    }

    tokens
}

/// Join token texts back into a single normalized query string.
pub fn join_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
