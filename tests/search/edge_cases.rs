//! Edge cases at the request boundary.

use crate::common::*;

#[test]
fn empty_query_contract() {
    let engine = engine();
    let response = search_now(&engine, &request(&riverdale(), "", 20));
    assert!(response.results.is_empty());
    assert_eq!(response.total, 0);
    assert!(response.intent.is_none());
    assert!(response.corrected_query.is_none());
}

#[test]
fn whitespace_only_query_treated_as_empty() {
    let engine = engine();
    let response = search_now(&engine, &request(&riverdale(), " \t  \n ", 20));
    assert!(response.results.is_empty());
    assert_eq!(response.total, 0);
}

#[test]
fn punctuation_only_query_treated_as_empty() {
    let engine = engine();
    let response = search_now(&engine, &request(&riverdale(), "?!... --- ***", 20));
    assert!(response.results.is_empty());
    assert_eq!(response.total, 0);
}

#[test]
fn oversized_limit_is_fine() {
    let engine = engine();
    let response = search_now(&engine, &request(&riverdale(), "garden", usize::MAX));
    assert_eq!(response.results.len(), response.total);
}

#[test]
fn accented_query_matches_ascii_content() {
    let engine = engine();
    // "gârdén" normalizes to "garden"
    let response = search_now(&engine, &request(&riverdale(), "gârdén", 20));
    assert!(!response.results.is_empty());
}

#[test]
fn control_characters_degrade_gracefully() {
    let engine = engine();
    let response = search_now(&engine, &request(&riverdale(), "gar\u{0000}den\u{0007}", 20));
    // Control characters act as word boundaries: the query tokenizes to
    // "gar" and "den", matches nothing, and the request completes cleanly
    assert!(response.results.is_empty());
    assert_eq!(response.total, 0);
}

#[test]
fn very_long_query_does_not_blow_up() {
    let engine = engine();
    let long = "garden ".repeat(500);
    let response = search_now(&engine, &request(&riverdale(), &long, 20));
    assert!(!response.results.is_empty());
}

#[test]
fn single_character_query_is_served() {
    let engine = engine();
    let response = search_now(&engine, &request(&riverdale(), "g", 20));
    // "g" matches nothing, corrects to nothing (too short), suggests fine
    assert!(response.results.is_empty());
    assert!(response.corrected_query.is_none());
}
