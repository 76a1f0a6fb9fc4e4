//! Query processing and ranking core for a multi-tenant community platform.
//!
//! This crate is the engine behind the platform's search page: it turns a
//! free-text query into a bounded, ranked, totaled result set, with intent
//! classification, spelling correction, and alternate-query suggestions
//! along the way.
//!
//! # Architecture
//!
//! ```text
//!                    ┌────────────┐
//!    raw query ────▶ │ tokenize   │
//!                    └─────┬──────┘
//!                          │ tokens
//!              ┌───────────┴───────────┐   (rayon::join)
//!              ▼                       ▼
//!        ┌──────────┐           ┌──────────┐
//!        │ correct  │           │ intent   │
//!        └────┬─────┘           └────┬─────┘
//!             │ corrected tokens     │ label
//!             ▼                      │
//!        ┌──────────┐                │
//!        │ retrieve │ ◀── TenantSnapshot (versioned, copy-on-write)
//!        └────┬─────┘                │
//!              │ candidates          │
//!              ▼                     │   (rayon::join)
//!        ┌──────────┐         ┌──────────┐
//!        │ rank     │         │ suggest  │
//!        └────┬─────┘         └────┬─────┘
//!             └───────┬────────────┘
//!                     ▼
//!              SearchResponse
//! ```
//!
//! Tenant isolation is structural: retrieval operates on a single tenant's
//! snapshot handle and cannot express a cross-tenant read. Anonymous
//! requests are fully reproducible; supplying a user id adds exactly one
//! personalization term to the ranking formula and nothing else.
//!
//! # Usage
//!
//! ```ignore
//! use agora_search::{SearchEngine, SearchRequest, SnapshotStore, TenantSnapshot};
//!
//! let store = Arc::new(SnapshotStore::new());
//! store.publish(TenantSnapshot::build(&tenant, &docs, popular, affinities)?);
//!
//! let engine = SearchEngine::new(store, SearchConfig::default());
//! let response = engine.search(&SearchRequest {
//!     tenant,
//!     query: "newslettar".into(),
//!     limit: 20,
//!     user: None,
//! })?;
//! ```

// Module declarations
pub mod cli;
mod config;
mod correct;
mod error;
mod index;
mod intent;
mod rank;
mod retrieve;
mod search;
mod snapshot;
mod suggest;
pub mod testing;
mod tokenize;
mod types;
mod vocab;

// Re-exports for public API
pub use config::{CorrectionConfig, IntentRules, RankWeights, SearchConfig, SuggestConfig};
pub use correct::{edit_distance_within, Corrector};
pub use error::SearchError;
pub use index::{
    build_tenant_index, build_tenant_index_parallel, Posting, PostingList, StoredDoc, TenantIndex,
    TenantMismatch,
};
pub use intent::Classifier;
pub use rank::rank;
pub use retrieve::retrieve;
pub use search::{SearchEngine, SearchRequest};
pub use snapshot::{
    AffinityProfile, SnapshotError, SnapshotSource, SnapshotStore, TenantSnapshot,
};
pub use suggest::suggest;
pub use tokenize::{is_stop_word, join_tokens, normalize, tokenize};
pub use types::{
    Candidate, ContentDoc, ContentId, ContentType, CorrectionProposal, IntentLabel, Query,
    RankedResult, SearchResponse, TenantId, Token, UserId,
};
pub use vocab::{PopularQuery, Vocabulary};
