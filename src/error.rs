// Copyright 2025-present Agora Platform Contributors
// SPDX-License-Identifier: Apache-2.0

//! Request-level error taxonomy.
//!
//! Deliberately small. Almost nothing in this pipeline is an error: a
//! low-confidence correction, an unclassifiable query, and an empty result
//! set are all normal outcomes. What remains is invalid input (rejected
//! before any work happens) and a tenant whose index could not be reached
//! even after retry - and the orchestrator converts the latter into a
//! degraded empty response rather than surfacing it to the page.

use crate::types::TenantId;
use std::fmt;

/// Errors a caller of [`crate::SearchEngine::search`] can see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The requested result limit was zero. Limits must be positive;
    /// callers supply their own defaults.
    InvalidLimit,
    /// No snapshot could be obtained for the tenant, even after retry.
    /// Surfaced only by APIs that cannot degrade (e.g. the CLI); the
    /// orchestrator itself degrades to an empty response instead.
    TenantUnavailable { tenant: TenantId },
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::InvalidLimit => {
                write!(f, "result limit must be a positive integer")
            }
            SearchError::TenantUnavailable { tenant } => {
                write!(f, "search index unavailable for tenant '{}'", tenant)
            }
        }
    }
}

impl std::error::Error for SearchError {}
