// Copyright 2025-present Agora Platform Contributors
// SPDX-License-Identifier: Apache-2.0

//! Result ranking: lexical relevance, recency, type priors, and optional
//! personalization, combined into one deterministic order.
//!
//! The combined score is a weighted sum:
//!
//! ```text
//! score = w_lexical * lexical        (TF-IDF, normalized to [0,1])
//!       + w_recency * recency        (exponential decay by content age)
//!       + w_type    * type_prior     (per-tenant prior for the content kind)
//!       + w_personal * affinity      (0.0 exactly when no user is supplied)
//! ```
//!
//! Anonymous requests must stay reproducible, so the personalization term
//! is identically zero without a user - not "small", zero. Ties break by
//! recency (newer first), then content id, so equal-scored results always
//! serialize in the same order.
//!
//! Truncation to the request limit is NOT done here: the orchestrator
//! needs the full ranked count for the response's `total` field.

use crate::config::RankWeights;
use crate::snapshot::TenantSnapshot;
use crate::types::{Candidate, RankedResult, UserId};
use std::cmp::Ordering;

/// A scored candidate, pre-sort. Internal to ranking.
struct Scored {
    result: RankedResult,
    published_at: i64,
}

/// Exponential recency decay in `[0, 1]`.
///
/// Half-life semantics: content exactly `half_life_days` old scores 0.5.
/// Future-dated content (scheduled posts) clamps to age zero.
fn recency_decay(published_at: i64, now: i64, half_life_days: f64) -> f64 {
    let age_secs = (now - published_at).max(0) as f64;
    let age_days = age_secs / 86_400.0;
    if half_life_days <= 0.0 {
        return 0.0;
    }
    (-age_days * std::f64::consts::LN_2 / half_life_days).exp()
}

/// Personalization affinity in `[0, 1]` for one candidate.
///
/// Combines the user's content-type affinity with the mean of their topic
/// affinities over the candidate's matched terms. Returns 0.0 for unknown
/// users - being logged in with no history ranks exactly like anonymous.
fn personal_affinity(
    snapshot: &TenantSnapshot,
    user: Option<&UserId>,
    candidate: &Candidate,
) -> f64 {
    let Some(user) = user else {
        return 0.0;
    };
    let Some(profile) = snapshot.affinities.get(user) else {
        return 0.0;
    };
    let Some(doc) = snapshot.index.docs.get(&candidate.content_id) else {
        return 0.0;
    };

    let type_part = profile.type_score(doc.kind);
    let term_part = if candidate.matched_terms.is_empty() {
        0.0
    } else {
        let sum: f64 = candidate
            .matched_terms
            .iter()
            .map(|t| profile.term_score(t))
            .sum();
        sum / candidate.matched_terms.len() as f64
    };

    (type_part + term_part) / 2.0
}

/// Deterministic result ordering: score desc, recency desc, content id asc.
fn compare_scored(a: &Scored, b: &Scored) -> Ordering {
    match b.result.score.partial_cmp(&a.result.score) {
        Some(Ordering::Equal) | None => match b.published_at.cmp(&a.published_at) {
            Ordering::Equal => a.result.content_id.cmp(&b.result.content_id),
            ord => ord,
        },
        Some(ord) => ord,
    }
}

/// Rank the full candidate set.
///
/// Returns every candidate, sorted; callers truncate afterwards so the
/// pre-truncation count survives into the response. With `user` absent the
/// ordering is a pure function of (candidates, snapshot, weights, now).
pub fn rank(
    candidates: &[Candidate],
    snapshot: &TenantSnapshot,
    weights: &RankWeights,
    user: Option<&UserId>,
    now: i64,
) -> Vec<RankedResult> {
    if candidates.is_empty() {
        return Vec::new();
    }

    // Normalize lexical scores by the batch maximum so the configured
    // weights mean the same thing regardless of corpus size
    let max_lexical = candidates
        .iter()
        .map(|c| c.lexical_score)
        .fold(0.0f64, f64::max)
        .max(f64::MIN_POSITIVE);

    let mut scored: Vec<Scored> = candidates
        .iter()
        .filter_map(|candidate| {
            let doc = snapshot.index.docs.get(&candidate.content_id)?;
            let lexical = candidate.lexical_score / max_lexical;
            let recency = recency_decay(doc.published_at, now, weights.recency_half_life_days);
            let prior = weights.type_prior_for(doc.kind);
            let personal = personal_affinity(snapshot, user, candidate);

            let score = weights.lexical * lexical
                + weights.recency * recency
                + weights.type_prior * prior
                + weights.personalization * personal;

            Some(Scored {
                result: RankedResult {
                    tenant: candidate.tenant.clone(),
                    content_id: candidate.content_id,
                    score,
                    kind: doc.kind,
                    snippet: doc.snippet.clone(),
                },
                published_at: doc.published_at,
            })
        })
        .collect();

    scored.sort_by(compare_scored);
    scored.into_iter().map(|s| s.result).collect()
}
