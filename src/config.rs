// Copyright 2025-present Agora Platform Contributors
// SPDX-License-Identifier: Apache-2.0

//! Tunable configuration for the search pipeline.
//!
//! Everything a tenant operator might reasonably want to adjust lives
//! here: correction thresholds, intent lexicons, ranking weights and type
//! priors, suggestion caps, and the request time budget. Every section has
//! serde defaults, so a config file only needs to spell out what it
//! changes.

use crate::types::ContentType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Spelling-correction thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CorrectionConfig {
    /// Maximum per-token edit distance considered for replacement.
    pub max_edit_distance: usize,
    /// The corrected query's aggregate frequency must be at least this
    /// multiple of the original's. Protects rare-but-valid domain terms.
    pub frequency_gain_min: f64,
    /// Minimum confidence for a proposal to surface.
    pub confidence_min: f64,
    /// Per-edit confidence damping factor in `(0, 1]`.
    pub distance_damping: f64,
}

impl Default for CorrectionConfig {
    fn default() -> Self {
        CorrectionConfig {
            max_edit_distance: 2,
            frequency_gain_min: 2.0,
            confidence_min: 0.5,
            distance_damping: 0.8,
        }
    }
}

/// Lexicons and weights for intent classification.
///
/// The defaults cover the platform's stock page names and community
/// vocabulary; tenants extend them (a sports club adds "fixtures", a choir
/// adds "rehearsal").
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IntentRules {
    pub navigational: Vec<String>,
    pub event: Vec<String>,
    pub person: Vec<String>,
    pub interrogatives: Vec<String>,
    pub person_interrogatives: Vec<String>,
    /// Weight of an entity-keyword hit.
    pub keyword_weight: f64,
    /// Weight of a bare interrogative hit.
    pub interrogative_weight: f64,
    /// Minimum accumulated signal for a label to win.
    pub min_signal: f64,
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| (*w).to_string()).collect()
}

impl Default for IntentRules {
    fn default() -> Self {
        IntentRules {
            navigational: words(&[
                "login", "signin", "signup", "register", "settings", "dashboard", "calendar",
                "newsletter", "contact", "about", "help", "faq", "home", "profile",
            ]),
            event: words(&[
                "event", "events", "meetup", "workshop", "festival", "concert", "fair",
                "potluck", "rsvp", "schedule", "tonight", "weekend", "upcoming",
            ]),
            person: words(&[
                "member", "members", "organizer", "organizers", "volunteer", "volunteers",
                "neighbor", "neighbors", "admin", "moderator",
            ]),
            interrogatives: words(&["what", "when", "where", "why", "how", "which"]),
            person_interrogatives: words(&["who", "whose", "whom"]),
            keyword_weight: 2.0,
            interrogative_weight: 1.0,
            min_signal: 1.0,
        }
    }
}

/// Ranking weights and per-tenant content-type priors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RankWeights {
    pub lexical: f64,
    pub recency: f64,
    pub type_prior: f64,
    pub personalization: f64,
    /// Content this old scores half its recency component.
    pub recency_half_life_days: f64,
    /// Prior in `[0, 1]` per content kind. Kinds missing from the map
    /// fall back to 0.5.
    pub type_priors: HashMap<ContentType, f64>,
}

impl RankWeights {
    pub fn type_prior_for(&self, kind: ContentType) -> f64 {
        self.type_priors.get(&kind).copied().unwrap_or(0.5)
    }
}

impl Default for RankWeights {
    fn default() -> Self {
        let type_priors = [
            (ContentType::Event, 1.0),
            (ContentType::Post, 0.8),
            (ContentType::Group, 0.7),
            (ContentType::Listing, 0.6),
            (ContentType::Member, 0.5),
            (ContentType::Page, 0.4),
        ]
        .into_iter()
        .collect();

        RankWeights {
            lexical: 1.0,
            recency: 0.3,
            type_prior: 0.2,
            personalization: 0.25,
            recency_half_life_days: 30.0,
            type_priors,
        }
    }
}

/// Suggestion-generation bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SuggestConfig {
    /// Hard cap on returned suggestions.
    pub max_suggestions: usize,
    /// Edit-distance bound used for the lexical-proximity tiebreak.
    pub proximity_bound: usize,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        SuggestConfig {
            max_suggestions: 5,
            proximity_bound: 6,
        }
    }
}

/// Top-level configuration for a `SearchEngine`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchConfig {
    pub correction: CorrectionConfig,
    pub intent: IntentRules,
    pub weights: RankWeights,
    pub suggest: SuggestConfig,
    /// Soft per-request budget in milliseconds. When exceeded mid-request
    /// the pipeline degrades (suggestions are dropped first) instead of
    /// failing. Zero disables the budget.
    pub budget_ms: u64,
}

impl SearchConfig {
    /// Production default: generous enough that only pathological requests
    /// ever hit the budget.
    pub const DEFAULT_BUDGET_MS: u64 = 250;

    pub fn with_default_budget() -> Self {
        SearchConfig {
            budget_ms: Self::DEFAULT_BUDGET_MS,
            ..SearchConfig::default()
        }
    }
}
