// Copyright 2025-present Agora Platform Contributors
// SPDX-License-Identifier: Apache-2.0

//! Candidate retrieval: boolean-OR term matching with TF-IDF scoring.
//!
//! Retrieval is deliberately generous - any document matching any query
//! term comes back as a candidate - and the ranker sorts out the rest.
//! Scores are term-frequency / inverse-document-frequency computed within
//! the tenant corpus, so a word that is everywhere on one tenant can still
//! be a strong signal on another.
//!
//! The function takes a `TenantIndex`, not a store handle: by the time
//! retrieval runs, the caller already holds exactly one tenant's snapshot
//! and could not reach another tenant's data if it tried.

use crate::index::TenantIndex;
use crate::types::{Candidate, ContentId, Token};
use std::collections::HashMap;

/// Retrieve candidates for the given tokens.
///
/// Stop-flagged tokens are skipped unless the entire query consists of
/// them ("the who" still has to match). An empty token set yields no
/// candidates - there is no match-everything fallback.
///
/// Candidates come back sorted by content id; ordering by relevance is
/// the ranker's job.
pub fn retrieve(index: &TenantIndex, tokens: &[Token]) -> Vec<Candidate> {
    let content_tokens: Vec<&Token> = tokens.iter().filter(|t| !t.stop).collect();
    let effective: Vec<&Token> = if content_tokens.is_empty() {
        tokens.iter().collect()
    } else {
        content_tokens
    };
    if effective.is_empty() {
        return Vec::new();
    }

    // Unique terms only: "garden garden" must not double-score
    let mut terms: Vec<&str> = effective.iter().map(|t| t.text.as_str()).collect();
    terms.sort_unstable();
    terms.dedup();

    let total_docs = index.total_docs() as f64;
    let mut scores: HashMap<ContentId, f64> = HashMap::new();
    let mut matched: HashMap<ContentId, Vec<String>> = HashMap::new();

    for term in terms {
        let Some(list) = index.postings(term) else {
            continue;
        };
        let idf = (1.0 + total_docs / list.doc_freq as f64).ln();
        for posting in &list.postings {
            let length = index
                .docs
                .get(&posting.content_id)
                .map(|d| d.length.max(1))
                .unwrap_or(1);
            let tf = f64::from(posting.term_freq) / length as f64;
            *scores.entry(posting.content_id).or_insert(0.0) += tf * idf;
            matched
                .entry(posting.content_id)
                .or_default()
                .push(term.to_string());
        }
    }

    let mut candidates: Vec<Candidate> = scores
        .into_iter()
        .map(|(content_id, lexical_score)| Candidate {
            tenant: index.tenant.clone(),
            content_id,
            lexical_score,
            matched_terms: matched.remove(&content_id).unwrap_or_default(),
        })
        .collect();
    candidates.sort_by_key(|c| c.content_id);
    candidates
}
