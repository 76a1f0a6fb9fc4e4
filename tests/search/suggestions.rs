//! Suggestion generation through the pipeline.

use crate::common::*;
use agora_search::{SearchConfig, SearchEngine, SuggestConfig};

#[test]
fn suggestions_drawn_from_popular_queries_by_count() {
    let engine = engine();
    let response = search_now(&engine, &request(&riverdale(), "tomato", 20));

    // Riverdale's log: harvest festival (40), compost (25), plot rules (9)
    assert_eq!(response.suggestions[0], "harvest festival");
    assert_eq!(response.suggestions[1], "compost");
}

#[test]
fn suggestions_never_include_the_input() {
    let engine = engine();
    let response = search_now(&engine, &request(&riverdale(), "compost", 20));
    assert!(!response.suggestions.contains(&"compost".to_string()));
}

#[test]
fn suggestions_capped_at_configured_maximum() {
    let config = SearchConfig {
        suggest: SuggestConfig {
            max_suggestions: 2,
            ..SuggestConfig::default()
        },
        ..SearchConfig::default()
    };
    let engine = SearchEngine::new(multi_tenant_store(), config);
    let response = search_now(&engine, &request(&riverdale(), "tomato", 20));
    assert!(response.suggestions.len() <= 2);
}

#[test]
fn empty_query_still_gets_popular_suggestions() {
    let engine = engine();
    let response = search_now(&engine, &request(&riverdale(), "", 20));
    assert!(response.results.is_empty());
    assert!(!response.suggestions.is_empty());
    assert_eq!(response.suggestions[0], "harvest festival");
}

#[test]
fn suggestions_are_tenant_scoped() {
    // Oakville has no popular-query log, so its suggestions come from its
    // own vocabulary - never from Riverdale's log
    let engine = engine();
    let response = search_now(&engine, &request(&oakville(), "tomato", 20));
    assert!(!response.suggestions.contains(&"harvest festival".to_string()));
    assert!(!response.suggestions.contains(&"plot rules".to_string()));
}

#[test]
fn zero_budget_is_not_a_deadline() {
    // budget_ms == 0 disables the budget; suggestions still run
    let engine = SearchEngine::new(multi_tenant_store(), SearchConfig::default());
    let response = search_now(&engine, &request(&riverdale(), "tomato", 20));
    assert!(!response.suggestions.is_empty());
}
