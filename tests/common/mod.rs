//! Shared fixtures for integration tests.

#![allow(dead_code)]

use agora_search::testing::{make_doc_at, make_doc_kind};
use agora_search::{
    AffinityProfile, ContentDoc, ContentType, PopularQuery, SearchConfig, SearchEngine,
    SearchRequest, SnapshotStore, TenantId, TenantSnapshot, UserId,
};
use std::collections::HashMap;
use std::sync::Arc;

/// Fixed "now" so recency scoring is reproducible across runs.
pub const NOW: i64 = 1_700_000_000;
pub const DAY: i64 = 86_400;

pub fn riverdale() -> TenantId {
    TenantId::new("riverdale")
}

pub fn oakville() -> TenantId {
    TenantId::new("oakville")
}

/// Riverdale: a community garden tenant with events, posts, and members.
pub fn riverdale_docs() -> Vec<ContentDoc> {
    let t = riverdale();
    vec![
        with_kind_at(1, &t, ContentType::Event, "Harvest Festival",
            "annual harvest festival with garden tours and a potluck", NOW - 2 * DAY),
        with_kind_at(2, &t, ContentType::Post, "Newsletter Archive",
            "every monthly newsletter issue since the garden opened", NOW - 40 * DAY),
        with_kind_at(3, &t, ContentType::Post, "Compost Basics",
            "how to start composting for your garden plot", NOW - 10 * DAY),
        with_kind_at(4, &t, ContentType::Member, "Maria Santos",
            "volunteer organizer for the tool library and seed swaps", NOW - 100 * DAY),
        with_kind_at(5, &t, ContentType::Page, "About the Garden",
            "riverdale community garden history and plot rules", NOW - 300 * DAY),
    ]
}

/// Oakville: a different tenant that also publishes garden content.
pub fn oakville_docs() -> Vec<ContentDoc> {
    let t = oakville();
    vec![
        with_kind_at(101, &t, ContentType::Post, "Garden Notes",
            "oakville garden notes and planting calendar", NOW - DAY),
        with_kind_at(102, &t, ContentType::Event, "Plant Sale",
            "spring plant sale in the oakville garden", NOW - 3 * DAY),
    ]
}

fn with_kind_at(
    id: u64,
    tenant: &TenantId,
    kind: ContentType,
    title: &str,
    body: &str,
    published_at: i64,
) -> ContentDoc {
    let mut doc = make_doc_kind(id, tenant, kind, title, body);
    doc.published_at = published_at;
    doc
}

/// Store with both tenants published, including Riverdale's popular
/// queries and one user affinity profile.
pub fn multi_tenant_store() -> Arc<SnapshotStore> {
    let store = Arc::new(SnapshotStore::new());

    let mut riverdale_snap = TenantSnapshot::build(
        &riverdale(),
        &riverdale_docs(),
        vec![
            PopularQuery { text: "harvest festival".into(), count: 40 },
            PopularQuery { text: "compost".into(), count: 25 },
            PopularQuery { text: "plot rules".into(), count: 9 },
        ],
        HashMap::new(),
    )
    .unwrap();
    riverdale_snap.affinities.insert(
        UserId(7),
        AffinityProfile {
            type_affinity: [(ContentType::Member, 0.9), (ContentType::Page, 0.8)]
                .into_iter()
                .collect(),
            term_affinity: [("compost".to_string(), 0.7)].into_iter().collect(),
        },
    );
    store.publish(riverdale_snap);

    let oakville_snap =
        TenantSnapshot::build(&oakville(), &oakville_docs(), Vec::new(), HashMap::new()).unwrap();
    store.publish(oakville_snap);

    store
}

pub fn engine() -> SearchEngine {
    SearchEngine::new(multi_tenant_store(), SearchConfig::default())
}

pub fn request(tenant: &TenantId, query: &str, limit: usize) -> SearchRequest {
    SearchRequest {
        tenant: tenant.clone(),
        query: query.to_string(),
        limit,
        user: None,
    }
}

/// Run a query at the fixed fixture clock.
pub fn search_now(
    engine: &SearchEngine,
    req: &SearchRequest,
) -> agora_search::SearchResponse {
    engine.search_at(req, NOW).expect("valid fixture request")
}

/// Convenience for `make_doc_at` with the fixture clock.
pub fn doc_days_old(id: u64, tenant: &TenantId, title: &str, body: &str, days: i64) -> ContentDoc {
    make_doc_at(id, tenant, title, body, NOW - days * DAY)
}
