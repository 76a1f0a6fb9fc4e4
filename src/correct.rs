// Copyright 2025-present Agora Platform Contributors
// SPDX-License-Identifier: Apache-2.0

//! Spelling correction against the tenant vocabulary.
//!
//! The corrector only fires when something is actually out of vocabulary.
//! "Newslettar" gets respelled to "newsletter" because the tenant publishes
//! a newsletter; "kombucha" stays untouched on a tenant that brews it, even
//! if the global language model would call it a typo. That is the whole
//! point of correcting against per-tenant frequencies instead of a shared
//! dictionary.
//!
//! A proposal must clear two bars before it is surfaced:
//! 1. The corrected query's aggregate frequency beats the original's by a
//!    configured margin (rare-but-valid domain terms survive).
//! 2. Confidence - frequency gain damped by edit distance - meets the
//!    configured minimum.

use crate::config::CorrectionConfig;
use crate::types::{CorrectionProposal, Token};
use crate::vocab::Vocabulary;

/// Edit distance between `a` and `b`, bounded by `max`.
///
/// Returns `None` when the distance exceeds `max`, with two early-exit
/// paths that skip the O(nm) DP where possible:
/// 1. `|len(a) - len(b)|` is a lower bound on edit distance
/// 2. if a full DP row's minimum exceeds `max`, no path can recover
///
/// Distances are computed over Unicode scalar values, not bytes.
pub fn edit_distance_within(a: &str, b: &str, max: usize) -> Option<usize> {
    let a_len = a.chars().count();
    let b_len = b.chars().count();

    if a_len.abs_diff(b_len) > max {
        return None;
    }

    let mut dp: Vec<usize> = (0..=b_len).collect();
    for (i, ac) in a.chars().enumerate() {
        let mut prev = dp[0];
        dp[0] = i + 1;
        let mut min_row = dp[0];

        for (j, bc) in b.chars().enumerate() {
            let temp = dp[j + 1];
            let cost = usize::from(ac != bc);
            dp[j + 1] = (dp[j + 1] + 1).min(dp[j] + 1).min(prev + cost);
            prev = temp;
            min_row = min_row.min(dp[j + 1]);
        }

        if min_row > max {
            return None;
        }
    }

    (dp[b_len] <= max).then_some(dp[b_len])
}

/// The best vocabulary replacement found for one token.
#[derive(Debug, Clone)]
struct Replacement {
    term: String,
    frequency: u64,
    distance: usize,
}

/// Proposes respellings of query tokens using the tenant vocabulary.
#[derive(Debug, Clone)]
pub struct Corrector {
    config: CorrectionConfig,
}

impl Corrector {
    pub fn new(config: CorrectionConfig) -> Self {
        Corrector { config }
    }

    /// Propose a corrected query, or `None`.
    ///
    /// `None` is the normal outcome, not a failure: every token already in
    /// vocabulary, no close-enough replacement, or a proposal that failed
    /// the frequency-margin or confidence test all land here.
    ///
    /// Deterministic for a fixed vocabulary snapshot: candidate selection
    /// totally orders replacements by (distance, frequency desc, term), so
    /// hash-map iteration order never leaks into the result.
    pub fn correct(&self, tokens: &[Token], vocab: &Vocabulary) -> Option<CorrectionProposal> {
        if tokens.is_empty() || vocab.is_empty() {
            return None;
        }

        // Stop words are never respelled; they count as in-vocabulary.
        let any_unknown = tokens
            .iter()
            .any(|t| !t.stop && !vocab.contains(&t.text));
        if !any_unknown {
            return None;
        }

        let mut corrected: Vec<String> = Vec::with_capacity(tokens.len());
        let mut total_distance = 0usize;
        let mut replaced_any = false;

        for token in tokens {
            if token.stop || vocab.contains(&token.text) || token.text.chars().count() < 2 {
                corrected.push(token.text.clone());
                continue;
            }
            match self.best_replacement(&token.text, vocab) {
                Some(rep) => {
                    total_distance += rep.distance;
                    corrected.push(rep.term);
                    replaced_any = true;
                }
                None => corrected.push(token.text.clone()),
            }
        }

        if !replaced_any {
            return None;
        }

        // Aggregate over content tokens only: stop words are common by
        // definition and would drown out the signal either way
        let original_freq: u64 = tokens
            .iter()
            .filter(|t| !t.stop)
            .map(|t| vocab.frequency(&t.text))
            .sum();
        let corrected_freq: u64 = tokens
            .iter()
            .zip(&corrected)
            .filter(|(t, _)| !t.stop)
            .map(|(_, c)| vocab.frequency(c))
            .sum();

        // Margin test: the respelling must be clearly more plausible than
        // the literal input, so rare-but-valid terms are left alone.
        let floor = (original_freq as f64).max(1.0);
        if (corrected_freq as f64) < self.config.frequency_gain_min * floor {
            return None;
        }

        let gain = corrected_freq as f64 / floor;
        let confidence =
            (gain / (gain + 1.0)) * self.config.distance_damping.powi(total_distance as i32);
        if confidence < self.config.confidence_min {
            return None;
        }

        Some(CorrectionProposal {
            text: corrected.join(" "),
            confidence,
            distance: total_distance,
        })
    }

    /// Scan the vocabulary for the closest frequency-weighted replacement.
    ///
    /// Selection order: smallest edit distance, then highest frequency,
    /// then lexically smallest term.
    ///
    /// Linear scan over the vocabulary. Tenant vocabularies run in the low
    /// thousands of terms and the bounded DP early-exits on length, so a
    /// Levenshtein automaton would not pay for itself here.
    fn best_replacement(&self, word: &str, vocab: &Vocabulary) -> Option<Replacement> {
        let max = self.config.max_edit_distance;
        let mut best: Option<Replacement> = None;

        for (term, frequency) in vocab.iter() {
            let Some(distance) = edit_distance_within(word, term, max) else {
                continue;
            };
            if distance == 0 {
                continue; // identical term, nothing to correct
            }
            let candidate = Replacement {
                term: term.to_string(),
                frequency,
                distance,
            };
            best = Some(match best.take() {
                None => candidate,
                Some(current) => {
                    let candidate_key =
                        (candidate.distance, std::cmp::Reverse(candidate.frequency));
                    let current_key = (current.distance, std::cmp::Reverse(current.frequency));
                    match candidate_key.cmp(&current_key) {
                        std::cmp::Ordering::Less => candidate,
                        std::cmp::Ordering::Equal if candidate.term < current.term => candidate,
                        _ => current,
                    }
                }
            });
        }

        best
    }
}
