// Copyright 2025-present Agora Platform Contributors
// SPDX-License-Identifier: Apache-2.0

//! Alternate-query suggestions.
//!
//! Suggestions come from two places: the tenant's popular-query log (what
//! neighbors actually search for) backfilled by high-frequency vocabulary
//! terms when the log is thin. Anything identical to the input - or just a
//! reshuffling of its tokens - is filtered out; suggesting the user's own
//! query back at them is worse than suggesting nothing.
//!
//! Ordering is popularity first, lexical proximity to the input second,
//! plain lexical order last, so the output is stable for a fixed snapshot.

use crate::config::SuggestConfig;
use crate::correct::edit_distance_within;
use crate::snapshot::TenantSnapshot;
use crate::tokenize::{is_stop_word, normalize, tokenize};
use std::collections::BTreeMap;

/// A scored suggestion candidate, pre-sort.
struct Entry {
    text: String,
    popularity: u64,
    proximity: usize,
}

/// Token multiset, used to spot trivial derivations of the input
/// ("garden party" vs "party garden").
fn token_multiset(text: &str) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for token in tokenize(text) {
        *counts.entry(token.text).or_insert(0) += 1;
    }
    counts
}

/// Generate up to `config.max_suggestions` alternate queries.
///
/// `raw_query` may be empty; the output is then simply the tenant's most
/// popular queries. Never returns the normalized input itself.
pub fn suggest(raw_query: &str, snapshot: &TenantSnapshot, config: &SuggestConfig) -> Vec<String> {
    if config.max_suggestions == 0 {
        return Vec::new();
    }

    let input = normalize(raw_query);
    let input_tokens = token_multiset(&input);

    let mut entries: Vec<Entry> = Vec::new();
    let mut seen: Vec<String> = Vec::new();

    let push = |text: String, popularity: u64, entries: &mut Vec<Entry>, seen: &mut Vec<String>| {
        if text.is_empty() || text == input {
            return;
        }
        if !input.is_empty() && token_multiset(&text) == input_tokens {
            return;
        }
        if seen.contains(&text) {
            return;
        }
        let proximity = edit_distance_within(&input, &text, config.proximity_bound)
            .unwrap_or(config.proximity_bound + 1);
        seen.push(text.clone());
        entries.push(Entry {
            text,
            popularity,
            proximity,
        });
    };

    for popular in &snapshot.popular_queries {
        push(
            normalize(&popular.text),
            popular.count,
            &mut entries,
            &mut seen,
        );
    }

    // Backfill from high-frequency vocabulary terms; stop words and
    // single characters make useless suggestions
    for (term, freq) in snapshot.vocabulary.terms_by_frequency() {
        if entries.len() >= config.max_suggestions * 2 {
            break; // enough material to sort and cut
        }
        if is_stop_word(term) || term.chars().count() < 2 {
            continue;
        }
        push(term.to_string(), freq, &mut entries, &mut seen);
    }

    entries.sort_by(|a, b| {
        b.popularity
            .cmp(&a.popularity)
            .then_with(|| a.proximity.cmp(&b.proximity))
            .then_with(|| a.text.cmp(&b.text))
    });

    entries
        .into_iter()
        .take(config.max_suggestions)
        .map(|e| e.text)
        .collect()
}
