// Copyright 2025-present Agora Platform Contributors
// SPDX-License-Identifier: Apache-2.0

//! The search orchestrator: one request in, one envelope out.
//!
//! The pipeline is fixed: validate → snapshot → tokenize → (correct ∥
//! classify) → retrieve → (rank ∥ suggest) → assemble. The corrector and
//! classifier have no data dependency on each other, and neither do
//! ranking and suggestion generation, so each pair runs as a `rayon::join`
//! against the read-only snapshot. Retrieval and ranking stay sequential -
//! you cannot rank candidates you have not fetched.
//!
//! Failure policy, in order of preference:
//! 1. Invalid input (zero limit) is rejected before any work happens.
//! 2. A transient snapshot failure gets one retry with a short backoff.
//! 3. Everything else - persistent storage failure, an unexpected panic
//!    anywhere in the pipeline - degrades to the empty "no results"
//!    envelope with an observability event. Search is a page feature, not
//!    a page; it must never take the page down with it.
//!
//! A soft time budget bounds tail latency: when a request has already
//! blown its budget by the time suggestions would run, suggestions are
//! dropped and the rest of the response goes out as-is.

use crate::config::SearchConfig;
use crate::correct::Corrector;
use crate::error::SearchError;
use crate::intent::Classifier;
use crate::rank::rank;
use crate::retrieve::retrieve;
use crate::snapshot::{SnapshotError, SnapshotSource, TenantSnapshot};
use crate::suggest::suggest;
use crate::tokenize::tokenize;
use crate::types::{Query, SearchResponse, TenantId, UserId};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use tracing::{debug, error, warn};

/// Backoff before the single snapshot-acquisition retry.
const RETRY_BACKOFF: Duration = Duration::from_millis(15);

/// What the controller layer hands us, verbatim.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub tenant: TenantId,
    pub query: String,
    /// Must be positive; the HTTP layer supplies its own default (20).
    pub limit: usize,
    pub user: Option<UserId>,
}

/// The query processing and ranking core.
///
/// One engine serves all tenants concurrently: per-request state lives on
/// the stack, and tenant data is reached only through read-only snapshot
/// handles. Cloning is cheap if callers want one per worker.
#[derive(Clone)]
pub struct SearchEngine {
    store: Arc<dyn SnapshotSource>,
    config: Arc<SearchConfig>,
    corrector: Corrector,
    classifier: Classifier,
}

impl SearchEngine {
    pub fn new(store: Arc<dyn SnapshotSource>, config: SearchConfig) -> Self {
        let corrector = Corrector::new(config.correction.clone());
        let classifier = Classifier::new(config.intent.clone());
        SearchEngine {
            store,
            config: Arc::new(config),
            corrector,
            classifier,
        }
    }

    /// Run one search request.
    ///
    /// Returns `Err` only for invalid input. Index trouble and internal
    /// faults degrade to an empty response - the caller renders "no
    /// results" and the incident shows up in the logs, not on the page.
    pub fn search(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0);
        self.search_at(request, now)
    }

    /// `search` with an explicit clock, for reproducible tests.
    pub fn search_at(
        &self,
        request: &SearchRequest,
        now: i64,
    ) -> Result<SearchResponse, SearchError> {
        if request.limit == 0 {
            return Err(SearchError::InvalidLimit);
        }

        let started = Instant::now();
        let outcome = catch_unwind(AssertUnwindSafe(|| self.run(request, now, started)));
        match outcome {
            Ok(response) => Ok(response),
            Err(_) => {
                error!(
                    tenant = %request.tenant,
                    query = %request.query,
                    "search pipeline panicked; returning degraded empty response"
                );
                Ok(SearchResponse::empty())
            }
        }
    }

    fn run(&self, request: &SearchRequest, now: i64, started: Instant) -> SearchResponse {
        let snapshot = match self.acquire_snapshot(&request.tenant) {
            Some(snapshot) => snapshot,
            None => return SearchResponse::empty(),
        };

        let mut tokens = tokenize(&request.query);
        snapshot.vocabulary.weigh_tokens(&mut tokens);

        // Empty and whitespace-only queries short-circuit: no retrieval,
        // no intent, no correction - but popular queries still make
        // useful suggestions for an empty search box.
        if tokens.is_empty() {
            let suggestions = self.suggestions_within_budget(&request.query, &snapshot, started);
            return SearchResponse {
                results: Vec::new(),
                intent: None,
                corrected_query: None,
                suggestions,
                total: 0,
            };
        }

        let query = Query {
            raw: request.query.clone(),
            tokens,
            tenant: request.tenant.clone(),
            user: request.user,
            limit: request.limit,
        };

        // Independent analyses of the same token sequence
        let (correction, intent) = rayon::join(
            || self.corrector.correct(&query.tokens, &snapshot.vocabulary),
            || self.classifier.classify(&query.tokens),
        );

        // An accepted proposal redirects retrieval to the corrected terms
        let (effective_tokens, corrected_query) = match correction {
            Some(proposal) => {
                debug!(
                    tenant = %query.tenant,
                    original = %query.raw,
                    corrected = %proposal.text,
                    confidence = proposal.confidence,
                    "applying spelling correction"
                );
                let mut corrected = tokenize(&proposal.text);
                snapshot.vocabulary.weigh_tokens(&mut corrected);
                (corrected, Some(proposal.text))
            }
            None => (query.tokens.clone(), None),
        };

        let candidates = retrieve(&snapshot.index, &effective_tokens);

        let (ranked, suggestions) = rayon::join(
            || {
                rank(
                    &candidates,
                    &snapshot,
                    &self.config.weights,
                    query.user.as_ref(),
                    now,
                )
            },
            || self.suggestions_within_budget(&query.raw, &snapshot, started),
        );

        let total = ranked.len();
        let mut results = ranked;
        results.truncate(query.limit);

        SearchResponse {
            results,
            intent,
            corrected_query,
            suggestions,
            total,
        }
    }

    /// Acquire the tenant snapshot, retrying a transient failure once.
    ///
    /// `None` means degrade: unknown tenant or persistent storage outage.
    fn acquire_snapshot(&self, tenant: &TenantId) -> Option<Arc<TenantSnapshot>> {
        match self.store.snapshot(tenant) {
            Ok(snapshot) => Some(snapshot),
            Err(SnapshotError::UnknownTenant(_)) => {
                warn!(tenant = %tenant, "search requested for tenant with no published index");
                None
            }
            Err(SnapshotError::Unavailable { reason, .. }) => {
                debug!(tenant = %tenant, %reason, "snapshot unavailable; retrying once");
                std::thread::sleep(RETRY_BACKOFF);
                match self.store.snapshot(tenant) {
                    Ok(snapshot) => Some(snapshot),
                    Err(err) => {
                        warn!(
                            tenant = %tenant,
                            error = %err,
                            "snapshot still unavailable after retry; degrading to empty response"
                        );
                        None
                    }
                }
            }
        }
    }

    /// Generate suggestions unless the request already blew its budget.
    fn suggestions_within_budget(
        &self,
        raw_query: &str,
        snapshot: &TenantSnapshot,
        started: Instant,
    ) -> Vec<String> {
        let budget = self.config.budget_ms;
        if budget > 0 && started.elapsed() > Duration::from_millis(budget) {
            debug!(
                tenant = %snapshot.tenant(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                budget_ms = budget,
                "request over budget; skipping suggestions"
            );
            return Vec::new();
        }
        suggest(raw_query, snapshot, &self.config.suggest)
    }
}
