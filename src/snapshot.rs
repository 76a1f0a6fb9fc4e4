// Copyright 2025-present Agora Platform Contributors
// SPDX-License-Identifier: Apache-2.0

//! Versioned, copy-on-write tenant snapshots.
//!
//! Search requests never lock anything for longer than a map lookup: they
//! clone an `Arc` to the tenant's current snapshot and work off that for
//! the whole request. Publishing swaps the `Arc` wholesale, so a reader
//! holding version N keeps seeing a consistent version N even while N+1
//! replaces it. There is no partially-updated state to observe.
//!
//! `SnapshotSource` is the seam between the core and whatever actually
//! stores indexes. The in-memory `SnapshotStore` is what production uses
//! today; tests substitute failing sources to exercise the degraded path.

use crate::index::{build_tenant_index, TenantIndex, TenantMismatch};
use crate::types::{ContentDoc, ContentType, TenantId, UserId};
use crate::vocab::{PopularQuery, Vocabulary};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A user's historical interaction aggregates, per tenant.
///
/// Values are affinity scores in `[0, 1]` maintained by the platform's
/// engagement pipeline (RSVPs, joins, replies, bookmarks). The ranker
/// reads them; nothing here writes them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffinityProfile {
    #[serde(default)]
    pub type_affinity: HashMap<ContentType, f64>,
    #[serde(default)]
    pub term_affinity: HashMap<String, f64>,
}

impl AffinityProfile {
    pub fn type_score(&self, kind: ContentType) -> f64 {
        self.type_affinity.get(&kind).copied().unwrap_or(0.0)
    }

    pub fn term_score(&self, term: &str) -> f64 {
        self.term_affinity.get(term).copied().unwrap_or(0.0)
    }
}

/// Everything a request needs from one tenant, frozen at publish time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantSnapshot {
    /// Monotonic per-tenant version, assigned by the store at publish.
    pub version: u64,
    pub index: TenantIndex,
    pub vocabulary: Vocabulary,
    #[serde(default)]
    pub popular_queries: Vec<PopularQuery>,
    #[serde(default)]
    pub affinities: HashMap<UserId, AffinityProfile>,
}

impl TenantSnapshot {
    /// Assemble a snapshot from raw content. The vocabulary is derived
    /// from the index so the two can never drift apart.
    pub fn build(
        tenant: &TenantId,
        content: &[ContentDoc],
        popular_queries: Vec<PopularQuery>,
        affinities: HashMap<UserId, AffinityProfile>,
    ) -> Result<Self, TenantMismatch> {
        let index = build_tenant_index(tenant, content)?;
        let vocabulary = index.vocabulary();
        Ok(TenantSnapshot {
            version: 0,
            index,
            vocabulary,
            popular_queries,
            affinities,
        })
    }

    pub fn tenant(&self) -> &TenantId {
        &self.index.tenant
    }
}

/// Why a snapshot could not be handed out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    /// No snapshot has ever been published for this tenant.
    UnknownTenant(TenantId),
    /// The backing store failed transiently; worth one retry.
    Unavailable { tenant: TenantId, reason: String },
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::UnknownTenant(tenant) => {
                write!(f, "no snapshot published for tenant '{}'", tenant)
            }
            SnapshotError::Unavailable { tenant, reason } => {
                write!(f, "snapshot for tenant '{}' unavailable: {}", tenant, reason)
            }
        }
    }
}

impl std::error::Error for SnapshotError {}

/// Read access to tenant snapshots - the storage seam.
///
/// The handle returned is the isolation boundary: retrieval can only see
/// the one tenant partition its snapshot belongs to.
pub trait SnapshotSource: Send + Sync {
    fn snapshot(&self, tenant: &TenantId) -> Result<Arc<TenantSnapshot>, SnapshotError>;
}

impl<S: SnapshotSource + ?Sized> SnapshotSource for Arc<S> {
    fn snapshot(&self, tenant: &TenantId) -> Result<Arc<TenantSnapshot>, SnapshotError> {
        (**self).snapshot(tenant)
    }
}

/// In-memory snapshot store shared by concurrent requests.
///
/// Reads are a short read-lock plus an `Arc` clone. Writes build the new
/// snapshot outside the lock and swap it in under a brief write-lock.
#[derive(Default)]
pub struct SnapshotStore {
    tenants: RwLock<HashMap<TenantId, Arc<TenantSnapshot>>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        SnapshotStore::default()
    }

    /// Publish a new snapshot for its tenant, assigning the next version.
    ///
    /// Readers holding the previous `Arc` keep a fully consistent view of
    /// the old version until they drop it.
    pub fn publish(&self, mut snapshot: TenantSnapshot) -> u64 {
        let tenant = snapshot.tenant().clone();
        let mut tenants = self.tenants.write();
        let version = tenants
            .get(&tenant)
            .map(|current| current.version + 1)
            .unwrap_or(1);
        snapshot.version = version;
        tenants.insert(tenant, Arc::new(snapshot));
        version
    }

    /// Tenants with a published snapshot, sorted for stable output.
    pub fn tenants(&self) -> Vec<TenantId> {
        let mut ids: Vec<TenantId> = self.tenants.read().keys().cloned().collect();
        ids.sort();
        ids
    }
}

impl SnapshotSource for SnapshotStore {
    fn snapshot(&self, tenant: &TenantId) -> Result<Arc<TenantSnapshot>, SnapshotError> {
        self.tenants
            .read()
            .get(tenant)
            .cloned()
            .ok_or_else(|| SnapshotError::UnknownTenant(tenant.clone()))
    }
}
