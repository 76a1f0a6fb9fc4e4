//! Fuzzed pipeline invariants: isolation, bounds, idempotence.

use crate::common::*;
use agora_search::testing::make_doc;
use agora_search::{
    ContentDoc, SearchConfig, SearchEngine, SnapshotStore, TenantId, TenantSnapshot,
};
use proptest::prelude::*;
use std::collections::HashMap;
use std::sync::Arc;

fn word() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z]{2,8}").unwrap()
}

fn doc_body() -> impl Strategy<Value = String> {
    proptest::collection::vec(word(), 3..12).prop_map(|words| words.join(" "))
}

fn corpus() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec(doc_body(), 1..6)
}

fn query() -> impl Strategy<Value = String> {
    proptest::collection::vec(word(), 1..4).prop_map(|words| words.join(" "))
}

fn build_store(
    tenant_a: &TenantId,
    bodies_a: &[String],
    tenant_b: &TenantId,
    bodies_b: &[String],
) -> Arc<SnapshotStore> {
    let docs_a: Vec<ContentDoc> = bodies_a
        .iter()
        .enumerate()
        .map(|(i, body)| make_doc(i as u64, tenant_a, &format!("Doc {}", i), body))
        .collect();
    let docs_b: Vec<ContentDoc> = bodies_b
        .iter()
        .enumerate()
        .map(|(i, body)| make_doc(1000 + i as u64, tenant_b, &format!("Doc {}", i), body))
        .collect();

    let store = Arc::new(SnapshotStore::new());
    store.publish(TenantSnapshot::build(tenant_a, &docs_a, Vec::new(), HashMap::new()).unwrap());
    store.publish(TenantSnapshot::build(tenant_b, &docs_b, Vec::new(), HashMap::new()).unwrap());
    store
}

proptest! {
    #[test]
    fn results_never_cross_tenants(
        bodies_a in corpus(),
        bodies_b in corpus(),
        query in query(),
        limit in 1usize..30,
    ) {
        let tenant_a = TenantId::new("alpha");
        let tenant_b = TenantId::new("beta");
        let store = build_store(&tenant_a, &bodies_a, &tenant_b, &bodies_b);
        let engine = SearchEngine::new(store, SearchConfig::default());

        for tenant in [&tenant_a, &tenant_b] {
            let response = engine
                .search_at(&request(tenant, &query, limit), NOW)
                .unwrap();
            for result in &response.results {
                prop_assert_eq!(&result.tenant, tenant);
            }
        }
    }

    #[test]
    fn results_bounded_and_total_consistent(
        bodies in corpus(),
        query in query(),
        limit in 1usize..10,
    ) {
        let tenant = TenantId::new("alpha");
        let store = build_store(&tenant, &bodies, &TenantId::new("beta"), &[]);
        let engine = SearchEngine::new(store, SearchConfig::default());

        let response = engine
            .search_at(&request(&tenant, &query, limit), NOW)
            .unwrap();
        prop_assert!(response.results.len() <= limit);
        prop_assert!(response.total >= response.results.len());
    }

    #[test]
    fn identical_requests_are_idempotent(
        bodies in corpus(),
        query in query(),
        limit in 1usize..10,
    ) {
        let tenant = TenantId::new("alpha");
        let store = build_store(&tenant, &bodies, &TenantId::new("beta"), &[]);
        let engine = SearchEngine::new(store, SearchConfig::default());

        let req = request(&tenant, &query, limit);
        let first = serde_json::to_string(&engine.search_at(&req, NOW).unwrap()).unwrap();
        let second = serde_json::to_string(&engine.search_at(&req, NOW).unwrap()).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn suggestions_never_echo_normalized_input(
        bodies in corpus(),
        query in query(),
    ) {
        let tenant = TenantId::new("alpha");
        let store = build_store(&tenant, &bodies, &TenantId::new("beta"), &[]);
        let engine = SearchEngine::new(store, SearchConfig::default());

        let response = engine
            .search_at(&request(&tenant, &query, 10), NOW)
            .unwrap();
        let normalized = agora_search::normalize(&query);
        prop_assert!(!response.suggestions.contains(&normalized));
    }

    #[test]
    fn arbitrary_input_never_errors_with_positive_limit(
        query in "\\PC{0,60}",
        limit in 1usize..50,
    ) {
        let tenant = TenantId::new("alpha");
        let store = build_store(&tenant, &["garden party".to_string()], &TenantId::new("beta"), &[]);
        let engine = SearchEngine::new(store, SearchConfig::default());

        let response = engine.search_at(&request(&tenant, &query, limit), NOW);
        prop_assert!(response.is_ok());
    }
}
