// Copyright 2025-present Agora Platform Contributors
// SPDX-License-Identifier: Apache-2.0

//! Tenant-scoped vocabulary and popular-query log.
//!
//! The vocabulary maps every indexed term to its corpus frequency. It is
//! derived from the tenant index at publish time, so it can never disagree
//! with what retrieval will actually find. The corrector walks it for
//! respelling candidates, the suggestion generator backfills from it, and
//! token weights come out of it.
//!
//! Read-only within a request; updates ride the snapshot publish path.

use crate::types::Token;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Term → corpus frequency for one tenant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Vocabulary {
    terms: HashMap<String, u64>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Vocabulary::default()
    }

    /// Build from (term, frequency) pairs. Duplicate terms accumulate.
    pub fn from_frequencies<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, u64)>,
    {
        let mut terms: HashMap<String, u64> = HashMap::new();
        for (term, freq) in pairs {
            *terms.entry(term).or_insert(0) += freq;
        }
        Vocabulary { terms }
    }

    /// Record one occurrence of a term.
    pub fn record(&mut self, term: &str) {
        *self.terms.entry(term.to_string()).or_insert(0) += 1;
    }

    /// Corpus frequency of a term; zero for unknown terms.
    #[inline]
    pub fn frequency(&self, term: &str) -> u64 {
        self.terms.get(term).copied().unwrap_or(0)
    }

    /// Is this term present in the tenant corpus at all?
    #[inline]
    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains_key(term)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Iterate all (term, frequency) entries. Iteration order is
    /// unspecified - callers needing determinism must sort.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.terms.iter().map(|(t, f)| (t.as_str(), *f))
    }

    /// Fill in each token's tenant-scoped frequency weight.
    ///
    /// Out-of-vocabulary tokens keep weight zero - that absence is the
    /// signal the corrector keys on.
    pub fn weigh_tokens(&self, tokens: &mut [Token]) {
        for token in tokens.iter_mut() {
            token.weight = self.frequency(&token.text) as f64;
        }
    }

    /// Terms sorted by frequency descending, then lexically, for
    /// deterministic suggestion backfill.
    pub fn terms_by_frequency(&self) -> Vec<(&str, u64)> {
        let mut entries: Vec<(&str, u64)> = self.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }
}

/// One entry in the tenant's popular-query log.
///
/// `text` is stored normalized; `count` is how often the query was run
/// over the log's window. Maintained by external ingestion, consumed
/// read-only here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularQuery {
    pub text: String,
    pub count: u64,
}
