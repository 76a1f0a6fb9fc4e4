// Copyright 2025-present Agora Platform Contributors
// SPDX-License-Identifier: Apache-2.0

//! Rule-based intent classification.
//!
//! No model, no guessing: a query earns an intent label only when the
//! configured lexicons say so, and `None` means exactly "no rule fired" -
//! callers treat it as unknown, never as an error.
//!
//! Signals accumulate per label. Entity-type keywords ("festival",
//! "organizer", "login") carry more weight than bare interrogatives, so
//! "when is the harvest festival" classifies as event-lookup rather than
//! generic informational. Ties break on a fixed label priority, which keeps
//! classification deterministic for any token sequence.

use crate::config::IntentRules;
use crate::types::{IntentLabel, Token};

/// Tie-break priority when two labels score equally.
///
/// More specific intents win over the generic informational bucket.
const LABEL_PRIORITY: [IntentLabel; 4] = [
    IntentLabel::Navigational,
    IntentLabel::EventLookup,
    IntentLabel::PersonLookup,
    IntentLabel::Informational,
];

/// Classifies queries into coarse intent labels using lexical rules.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: IntentRules,
}

impl Classifier {
    pub fn new(rules: IntentRules) -> Self {
        Classifier { rules }
    }

    /// Classify a token sequence, or return `None` when no rule clears
    /// the signal threshold.
    ///
    /// Stop-flagged tokens participate: interrogatives ("when", "who")
    /// are stop words for retrieval but are exactly the signal this
    /// classifier needs.
    pub fn classify(&self, tokens: &[Token]) -> Option<IntentLabel> {
        if tokens.is_empty() {
            return None;
        }

        let mut scores = [0.0f64; 4];
        let mut bump = |label: IntentLabel, amount: f64| {
            let slot = LABEL_PRIORITY.iter().position(|l| *l == label).unwrap_or(3);
            scores[slot] += amount;
        };

        for token in tokens {
            let word = token.text.as_str();
            if self.rules.navigational.iter().any(|k| k == word) {
                bump(IntentLabel::Navigational, self.rules.keyword_weight);
            }
            if self.rules.event.iter().any(|k| k == word) {
                bump(IntentLabel::EventLookup, self.rules.keyword_weight);
            }
            if self.rules.person.iter().any(|k| k == word) {
                bump(IntentLabel::PersonLookup, self.rules.keyword_weight);
            }
            if self.rules.person_interrogatives.iter().any(|k| k == word) {
                // "who is ..." points at a person even with no entity keyword
                bump(IntentLabel::PersonLookup, self.rules.keyword_weight);
            } else if self.rules.interrogatives.iter().any(|k| k == word) {
                bump(IntentLabel::Informational, self.rules.interrogative_weight);
            }
        }

        // Highest score wins; LABEL_PRIORITY order settles exact ties
        let (winner_idx, winner_score) = scores
            .iter()
            .enumerate()
            .fold((0usize, f64::MIN), |(bi, bs), (i, &s)| {
                if s > bs {
                    (i, s)
                } else {
                    (bi, bs)
                }
            });

        (winner_score >= self.rules.min_signal).then(|| LABEL_PRIORITY[winner_idx])
    }
}
