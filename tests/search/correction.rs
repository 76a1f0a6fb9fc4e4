//! Spelling correction through the full pipeline.

use crate::common::*;

#[test]
fn newslettar_corrects_to_newsletter_and_retrieves_it() {
    let engine = engine();
    let response = search_now(&engine, &request(&riverdale(), "newslettar", 20));

    assert_eq!(response.corrected_query.as_deref(), Some("newsletter"));
    // retrieval used the corrected term: the archive doc is found even
    // though "newslettar" itself matches nothing
    assert!(response
        .results
        .iter()
        .any(|r| r.content_id.get() == 2));
    assert!(response.total >= 1);
}

#[test]
fn well_spelled_query_gets_no_correction() {
    let engine = engine();
    let response = search_now(&engine, &request(&riverdale(), "compost garden", 20));
    assert!(response.corrected_query.is_none());
}

#[test]
fn nonsense_query_gets_no_correction_and_no_results() {
    let engine = engine();
    let response = search_now(&engine, &request(&riverdale(), "xqzwv pltkm", 20));
    assert!(response.corrected_query.is_none());
    assert!(response.results.is_empty());
    assert_eq!(response.total, 0);
}

#[test]
fn multi_token_query_corrects_only_the_broken_token() {
    let engine = engine();
    let response = search_now(&engine, &request(&riverdale(), "compost basocs", 20));

    // "compost" is fine, "basocs" respells to "basics"
    assert_eq!(response.corrected_query.as_deref(), Some("compost basics"));
    assert!(response.results.iter().any(|r| r.content_id.get() == 3));
}

#[test]
fn correction_is_tenant_scoped() {
    // "newslettar" corrects on Riverdale (which has a newsletter) but not
    // on Oakville (which has never published one)
    let engine = engine();
    let riverdale_resp = search_now(&engine, &request(&riverdale(), "newslettar", 20));
    let oakville_resp = search_now(&engine, &request(&oakville(), "newslettar", 20));

    assert!(riverdale_resp.corrected_query.is_some());
    assert!(oakville_resp.corrected_query.is_none());
    assert!(oakville_resp.results.is_empty());
}
