// Copyright 2025-present Agora Platform Contributors
// SPDX-License-Identifier: Apache-2.0

//! Per-tenant inverted index construction.
//!
//! One index per tenant, built from that tenant's published content and
//! nothing else. Tenant mismatch is rejected at construction - by the time
//! a search request holds an index, cross-tenant leakage is structurally
//! impossible rather than filtered away.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **SINGLE_TENANT**: every stored doc's tenant equals the index tenant
//! 2. **POSTING_LIST_SORTED**: each posting list is sorted by content id
//! 3. **DOC_FREQ_CORRECT**: `doc_freq` equals the posting count (one
//!    posting per document per term)
//! 4. **NON_EMPTY**: every term has at least one posting

use crate::tokenize::tokenize;
use crate::types::{ContentDoc, ContentId, ContentType, TenantId};
use crate::vocab::Vocabulary;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Title terms count this many times per occurrence. A match in "Harvest
/// Festival" the title should outweigh a mention buried in a body.
const TITLE_TERM_WEIGHT: u32 = 2;

/// How much of the body makes it into the display snippet.
const SNIPPET_BODY_CHARS: usize = 120;

/// One term occurrence record: which document, how often.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Posting {
    pub content_id: ContentId,
    pub term_freq: u32,
}

/// All postings for one term, sorted by content id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostingList {
    pub postings: Vec<Posting>,
    /// Number of documents containing the term (= postings.len(), since
    /// postings are per-document).
    pub doc_freq: usize,
}

impl PostingList {
    /// Total occurrences of the term across the corpus.
    pub fn total_freq(&self) -> u64 {
        self.postings.iter().map(|p| u64::from(p.term_freq)).sum()
    }
}

/// Document metadata the ranker and snippet builder need.
///
/// The full body is not kept - only the token count (for TF normalization)
/// and a display snippet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredDoc {
    pub kind: ContentType,
    pub title: String,
    pub snippet: String,
    pub published_at: i64,
    pub popularity: f64,
    /// Indexed token count (title + body), for length normalization.
    pub length: usize,
}

/// Inverted index over one tenant's content.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantIndex {
    pub tenant: TenantId,
    pub terms: HashMap<String, PostingList>,
    /// BTreeMap so iteration (and serialization) is ordered by content id.
    pub docs: BTreeMap<ContentId, StoredDoc>,
}

impl TenantIndex {
    /// Number of indexed documents.
    pub fn total_docs(&self) -> usize {
        self.docs.len()
    }

    /// Look up a term's posting list.
    #[inline]
    pub fn postings(&self, term: &str) -> Option<&PostingList> {
        self.terms.get(term)
    }

    /// Derive the tenant vocabulary from the index.
    ///
    /// Frequencies are total term occurrences, so the vocabulary can never
    /// disagree with what retrieval will find.
    pub fn vocabulary(&self) -> Vocabulary {
        Vocabulary::from_frequencies(
            self.terms
                .iter()
                .map(|(term, list)| (term.clone(), list.total_freq())),
        )
    }
}

/// A document was offered to an index of a different tenant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantMismatch {
    pub index_tenant: TenantId,
    pub doc_tenant: TenantId,
    pub content_id: ContentId,
}

impl fmt::Display for TenantMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "content {} belongs to tenant '{}', not '{}'",
            self.content_id, self.doc_tenant, self.index_tenant
        )
    }
}

impl std::error::Error for TenantMismatch {}

/// Tokenize one document into (term, weighted count) plus its length.
fn doc_term_counts(doc: &ContentDoc) -> (HashMap<String, u32>, usize) {
    let mut counts: HashMap<String, u32> = HashMap::new();
    let mut length = 0usize;

    for token in tokenize(&doc.title) {
        *counts.entry(token.text).or_insert(0) += TITLE_TERM_WEIGHT;
        length += 1;
    }
    for token in tokenize(&doc.body) {
        *counts.entry(token.text).or_insert(0) += 1;
        length += 1;
    }

    (counts, length)
}

fn stored_doc(doc: &ContentDoc, length: usize) -> StoredDoc {
    let body_prefix: String = doc.body.chars().take(SNIPPET_BODY_CHARS).collect();
    let snippet = if body_prefix.is_empty() {
        doc.title.clone()
    } else {
        format!("{} - {}", doc.title, body_prefix)
    };
    StoredDoc {
        kind: doc.kind,
        title: doc.title.clone(),
        snippet,
        published_at: doc.published_at,
        popularity: doc.popularity,
        length,
    }
}

/// Build an inverted index from one tenant's documents.
///
/// Rejects any document stamped with a different tenant - isolation is
/// enforced here, at the index boundary, not by post-filtering results.
pub fn build_tenant_index(
    tenant: &TenantId,
    content: &[ContentDoc],
) -> Result<TenantIndex, TenantMismatch> {
    for doc in content {
        if doc.tenant != *tenant {
            return Err(TenantMismatch {
                index_tenant: tenant.clone(),
                doc_tenant: doc.tenant.clone(),
                content_id: doc.id,
            });
        }
    }

    let mut terms: HashMap<String, Vec<Posting>> = HashMap::new();
    let mut docs: BTreeMap<ContentId, StoredDoc> = BTreeMap::new();

    for doc in content {
        let (counts, length) = doc_term_counts(doc);
        docs.insert(doc.id, stored_doc(doc, length));
        for (term, term_freq) in counts {
            terms.entry(term).or_default().push(Posting {
                content_id: doc.id,
                term_freq,
            });
        }
    }

    Ok(TenantIndex {
        tenant: tenant.clone(),
        terms: finalize_posting_lists(terms),
        docs,
    })
}

/// Parallel map-reduce build for large corpora.
///
/// Map: per-document tokenization on the rayon pool. Reduce: merge the
/// per-document term maps. Output is identical to `build_tenant_index`.
pub fn build_tenant_index_parallel(
    tenant: &TenantId,
    content: &[ContentDoc],
) -> Result<TenantIndex, TenantMismatch> {
    for doc in content {
        if doc.tenant != *tenant {
            return Err(TenantMismatch {
                index_tenant: tenant.clone(),
                doc_tenant: doc.tenant.clone(),
                content_id: doc.id,
            });
        }
    }

    // MAP: tokenize documents in parallel
    let per_doc: Vec<(ContentId, StoredDoc, HashMap<String, u32>)> = content
        .par_iter()
        .map(|doc| {
            let (counts, length) = doc_term_counts(doc);
            (doc.id, stored_doc(doc, length), counts)
        })
        .collect();

    // REDUCE: merge per-document maps
    let mut terms: HashMap<String, Vec<Posting>> = HashMap::new();
    let mut docs: BTreeMap<ContentId, StoredDoc> = BTreeMap::new();
    for (content_id, stored, counts) in per_doc {
        docs.insert(content_id, stored);
        for (term, term_freq) in counts {
            terms.entry(term).or_default().push(Posting {
                content_id,
                term_freq,
            });
        }
    }

    Ok(TenantIndex {
        tenant: tenant.clone(),
        terms: finalize_posting_lists(terms),
        docs,
    })
}

/// Sort each posting list and attach doc frequencies.
fn finalize_posting_lists(terms: HashMap<String, Vec<Posting>>) -> HashMap<String, PostingList> {
    terms
        .into_iter()
        .map(|(term, mut postings)| {
            // INVARIANT: POSTING_LIST_SORTED
            postings.sort();
            let doc_freq = postings.len();
            (term, PostingList { postings, doc_freq })
        })
        .collect()
}

/// Well-formedness check used by tests and debug assertions.
#[cfg(any(debug_assertions, test))]
pub fn check_index_well_formed(index: &TenantIndex) -> bool {
    for list in index.terms.values() {
        if list.postings.is_empty() {
            return false;
        }
        if list.doc_freq != list.postings.len() {
            return false;
        }
        for pair in list.postings.windows(2) {
            if pair[0].content_id >= pair[1].content_id {
                return false;
            }
        }
        for posting in &list.postings {
            if !index.docs.contains_key(&posting.content_id) {
                return false;
            }
        }
    }
    true
}
