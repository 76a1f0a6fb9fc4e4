// Copyright 2025-present Agora Platform Contributors
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of a search request and its response.
//!
//! These types define how tenants, content, query tokens, and ranked results
//! fit together. Everything flowing through the pipeline carries an explicit
//! tenant identifier so cross-tenant mixing is impossible to express quietly.
//!
//! # Invariants (the stuff that breaks if you ignore it)
//!
//! - **Candidate / RankedResult**: carries exactly the tenant of the snapshot
//!   it was retrieved from. Retrieval hands out candidates stamped with the
//!   snapshot's tenant; nothing downstream may re-stamp them.
//!
//! - **SearchResponse**: `results.len() <= limit` and `total >= results.len()`.
//!   `total` counts ranked candidates before truncation, never after.
//!
//! - **Query**: immutable once constructed. The orchestrator builds it after
//!   limit validation and tokenization; no stage mutates it afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Identifier of an isolated community instance.
///
/// Tenant identifiers are opaque slugs assigned at provisioning time
/// (e.g. "brooklyn-gardens"). Every piece of indexed content and every
/// vocabulary entry is partitioned by one of these.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct TenantId(pub String);

impl TenantId {
    pub fn new(slug: impl Into<String>) -> Self {
        TenantId(slug.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Type-safe content identifier.
///
/// Prevents accidentally passing a user id where a content id is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct ContentId(pub u64);

impl ContentId {
    #[inline]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for ContentId {
    fn from(id: u64) -> Self {
        ContentId(id)
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Authenticated user identifier, supplied by the session layer.
///
/// Always optional at the core entry point: anonymous searches are the
/// common case and must stay fully reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        UserId(id)
    }
}

// =============================================================================
// CONTENT
// =============================================================================

/// What kind of community content a document is.
///
/// The ranker applies a per-tenant prior to each kind (events usually
/// outrank static pages), and personalization tracks per-kind affinity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Event,
    Group,
    Listing,
    Member,
    Post,
    Page,
}

impl ContentType {
    /// Lowercase string form, matching the serde `rename_all` convention.
    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::Event => "event",
            ContentType::Group => "group",
            ContentType::Listing => "listing",
            ContentType::Member => "member",
            ContentType::Post => "post",
            ContentType::Page => "page",
        }
    }

    /// All kinds, in prior order. Used by config defaults and fixtures.
    pub const ALL: [ContentType; 6] = [
        ContentType::Event,
        ContentType::Group,
        ContentType::Listing,
        ContentType::Member,
        ContentType::Post,
        ContentType::Page,
    ];
}

/// A piece of publishable content, as handed to index construction.
///
/// Created when content is published or edited; a search request never
/// mutates one. `published_at` is unix seconds, `popularity` is whatever
/// engagement aggregate the platform maintains (views, RSVPs, replies).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDoc {
    pub id: ContentId,
    pub tenant: TenantId,
    #[serde(rename = "type")]
    pub kind: ContentType,
    pub title: String,
    pub body: String,
    pub published_at: i64,
    #[serde(default)]
    pub popularity: f64,
}

// =============================================================================
// QUERY
// =============================================================================

/// One normalized query token.
///
/// `start..end` is the byte span in the raw query string (useful for
/// highlighting the corrected portion in the UI). `stop` marks stop words;
/// the tokenizer flags them but never drops them, because an all-stop-word
/// query ("the who") still has to retrieve something.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub stop: bool,
    /// Tenant-scoped corpus frequency, filled in once a snapshot is held.
    /// Zero until then, and zero for out-of-vocabulary terms.
    #[serde(default)]
    pub weight: f64,
}

impl Token {
    pub fn new(text: impl Into<String>, start: usize, end: usize, stop: bool) -> Self {
        Token {
            text: text.into(),
            start,
            end,
            stop,
            weight: 0.0,
        }
    }
}

/// An immutable, fully-resolved search request.
///
/// Built by the orchestrator after limit validation and tokenization.
/// Everything downstream borrows from this; nothing writes back to it.
#[derive(Debug, Clone)]
pub struct Query {
    pub raw: String,
    pub tokens: Vec<Token>,
    pub tenant: TenantId,
    pub user: Option<UserId>,
    pub limit: usize,
}

// =============================================================================
// PIPELINE INTERMEDIATES
// =============================================================================

/// A content match produced by retrieval, before ranking.
///
/// Transient: lives for one request, never persisted. The tenant stamp
/// comes from the snapshot the candidate was retrieved from.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub tenant: TenantId,
    pub content_id: ContentId,
    /// TF-IDF score within the tenant corpus.
    pub lexical_score: f64,
    /// Query terms that hit this document (drives topic affinity in ranking).
    pub matched_terms: Vec<String>,
}

/// A proposed respelling of the query.
///
/// Offered only when the corrector clears its confidence threshold;
/// discarded after the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrectionProposal {
    pub text: String,
    /// In `[0, 1]`. Higher means the respelling is much more plausible
    /// than the literal input.
    pub confidence: f64,
    /// Total edit distance from the original tokens.
    pub distance: usize,
}

/// Coarse classification of what a query is trying to accomplish.
///
/// `None` at the call site means "no rule fired" - unknown, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntentLabel {
    Navigational,
    Informational,
    #[serde(rename = "event-lookup")]
    EventLookup,
    #[serde(rename = "person-lookup")]
    PersonLookup,
}

impl IntentLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            IntentLabel::Navigational => "navigational",
            IntentLabel::Informational => "informational",
            IntentLabel::EventLookup => "event-lookup",
            IntentLabel::PersonLookup => "person-lookup",
        }
    }
}

// =============================================================================
// RESPONSE
// =============================================================================

/// One ranked search hit, ready for display.
///
/// Exists only for the lifetime of one response. The snippet is a short
/// display reference (title plus a body prefix), not the full content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedResult {
    pub tenant: TenantId,
    pub content_id: ContentId,
    pub score: f64,
    #[serde(rename = "type")]
    pub kind: ContentType,
    pub snippet: String,
}

/// The fixed-shape envelope handed back to the page layer.
///
/// `intent` and `corrected_query` are genuinely optional; `results`,
/// `suggestions` and `total` are always present (possibly empty/zero).
/// Results are ordered relevance-desc, ties broken by recency-desc then
/// content id-asc, so identical requests against the same snapshot
/// version serialize byte-identically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub results: Vec<RankedResult>,
    #[serde(default)]
    pub intent: Option<IntentLabel>,
    #[serde(default)]
    pub corrected_query: Option<String>,
    pub suggestions: Vec<String>,
    /// Matching-candidate count before truncation to `limit`.
    pub total: usize,
}

impl SearchResponse {
    /// The degraded "nothing found" envelope used when the index is
    /// unavailable or an internal fault was caught at the orchestrator
    /// boundary. The page renders "no results", never an error.
    pub fn empty() -> Self {
        SearchResponse {
            results: Vec::new(),
            intent: None,
            corrected_query: None,
            suggestions: Vec::new(),
            total: 0,
        }
    }
}
