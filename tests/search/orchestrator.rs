//! End-to-end orchestration: the full envelope contract.

use crate::common::*;
use agora_search::testing::DownSource;
use agora_search::{SearchConfig, SearchEngine, SearchError};
use std::sync::Arc;

#[test]
fn envelope_has_all_fixed_fields() {
    let engine = engine();
    let response = search_now(&engine, &request(&riverdale(), "garden", 20));

    assert!(!response.results.is_empty());
    assert!(response.total >= response.results.len());
    // suggestions and total always present; intent/correction optional
    assert!(response.corrected_query.is_none());
}

#[test]
fn results_bounded_by_limit_with_full_total() {
    let engine = engine();
    let unbounded = search_now(&engine, &request(&riverdale(), "garden", 20));
    let bounded = search_now(&engine, &request(&riverdale(), "garden", 2));

    assert!(unbounded.total > 2, "fixture should match more than 2 docs");
    assert_eq!(bounded.results.len(), 2);
    assert_eq!(bounded.total, unbounded.total);
    // truncation keeps the top of the same ordering
    assert_eq!(
        bounded.results[0].content_id,
        unbounded.results[0].content_id
    );
}

#[test]
fn zero_limit_is_rejected_not_coerced() {
    let engine = engine();
    let result = engine.search_at(&request(&riverdale(), "garden", 0), NOW);
    assert_eq!(result, Err(SearchError::InvalidLimit));
}

#[test]
fn zero_limit_rejected_even_when_store_is_down() {
    // InvalidInput must win before any retrieval work happens
    let engine = SearchEngine::new(Arc::new(DownSource), SearchConfig::default());
    let result = engine.search_at(&request(&riverdale(), "garden", 0), NOW);
    assert_eq!(result, Err(SearchError::InvalidLimit));
}

#[test]
fn storage_outage_degrades_to_empty_envelope() {
    let engine = SearchEngine::new(Arc::new(DownSource), SearchConfig::default());
    let response = search_now(&engine, &request(&riverdale(), "garden", 20));
    assert!(response.results.is_empty());
    assert_eq!(response.total, 0);
    assert!(response.intent.is_none());
    assert!(response.corrected_query.is_none());
}

#[test]
fn transient_outage_served_after_retry() {
    use agora_search::testing::FlakySource;

    let flaky = FlakySource::new(multi_tenant_store(), 1);
    let engine = SearchEngine::new(Arc::new(flaky), SearchConfig::default());
    let response = search_now(&engine, &request(&riverdale(), "garden", 20));
    assert!(!response.results.is_empty());
}

#[test]
fn response_serializes_to_camel_case_json() {
    let engine = engine();
    let response = search_now(&engine, &request(&riverdale(), "newslettar", 20));
    let json = serde_json::to_value(&response).unwrap();

    assert!(json.get("correctedQuery").is_some());
    assert!(json.get("results").unwrap().is_array());
    assert!(json.get("total").unwrap().is_u64());
}
