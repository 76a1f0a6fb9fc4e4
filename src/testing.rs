// Copyright 2025-present Agora Platform Contributors
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical fixture builders so every test constructs
//! documents and snapshots the same way.

#![doc(hidden)]

use crate::snapshot::{
    AffinityProfile, SnapshotError, SnapshotSource, TenantSnapshot,
};
use crate::types::{ContentDoc, ContentId, ContentType, TenantId, UserId};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Fixed publication instant for fixtures that do not care about recency.
pub const FIXTURE_TIME: i64 = 1_700_000_000;

/// Create a post with default timestamp and popularity.
pub fn make_doc(id: u64, tenant: &TenantId, title: &str, body: &str) -> ContentDoc {
    make_doc_at(id, tenant, title, body, FIXTURE_TIME)
}

/// Create a post published at a specific instant.
pub fn make_doc_at(id: u64, tenant: &TenantId, title: &str, body: &str, published_at: i64) -> ContentDoc {
    ContentDoc {
        id: ContentId(id),
        tenant: tenant.clone(),
        kind: ContentType::Post,
        title: title.to_string(),
        body: body.to_string(),
        published_at,
        popularity: 0.0,
    }
}

/// Create a document of a specific content kind.
pub fn make_doc_kind(
    id: u64,
    tenant: &TenantId,
    kind: ContentType,
    title: &str,
    body: &str,
) -> ContentDoc {
    ContentDoc {
        kind,
        ..make_doc(id, tenant, title, body)
    }
}

/// Build a snapshot straight from documents, with no popular queries or
/// affinity profiles.
pub fn snapshot_from_docs(tenant: &TenantId, docs: &[ContentDoc]) -> TenantSnapshot {
    TenantSnapshot::build(tenant, docs, Vec::new(), HashMap::new())
        .expect("fixture docs must match fixture tenant")
}

/// Affinity profile map with a single user entry.
pub fn affinities_for(user: UserId, profile: AffinityProfile) -> HashMap<UserId, AffinityProfile> {
    [(user, profile)].into_iter().collect()
}

/// A snapshot source that fails its first `failures` calls, then
/// delegates. Exercises the retry-and-degrade path at the retrieval
/// boundary.
pub struct FlakySource<S> {
    inner: S,
    remaining_failures: AtomicUsize,
}

impl<S> FlakySource<S> {
    pub fn new(inner: S, failures: usize) -> Self {
        FlakySource {
            inner,
            remaining_failures: AtomicUsize::new(failures),
        }
    }
}

impl<S: SnapshotSource> SnapshotSource for FlakySource<S> {
    fn snapshot(&self, tenant: &TenantId) -> Result<Arc<TenantSnapshot>, SnapshotError> {
        let remaining = self.remaining_failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.remaining_failures.store(remaining - 1, Ordering::SeqCst);
            return Err(SnapshotError::Unavailable {
                tenant: tenant.clone(),
                reason: "injected fault".to_string(),
            });
        }
        self.inner.snapshot(tenant)
    }
}

/// A source whose every call fails; the persistent-outage case.
pub struct DownSource;

impl SnapshotSource for DownSource {
    fn snapshot(&self, tenant: &TenantId) -> Result<Arc<TenantSnapshot>, SnapshotError> {
        Err(SnapshotError::Unavailable {
            tenant: tenant.clone(),
            reason: "store offline".to_string(),
        })
    }
}
