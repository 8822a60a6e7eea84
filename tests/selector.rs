//! Scope selector matching tests
//!
//! Covers pattern parsing, ancestor-aware matching, exclusions and the
//! specificity ordering used for rule ranking.

use scopelens::selector::{ScopePath, Selector, Specificity};

fn matches(selector: &str, scope: &str) -> Option<Specificity> {
    Selector::parse(selector)
        .unwrap()
        .matches(&ScopePath::parse(scope))
}

// ========================================================================
// Basic matching
// ========================================================================

#[test]
fn test_exact_atom_match() {
    assert!(matches("comment", "comment").is_some());
    assert!(matches("comment", "keyword").is_none());
}

#[test]
fn test_segment_prefix_match() {
    assert!(matches("comment", "comment.line.double-slash").is_some());
    assert!(matches("comment.line", "comment.line.double-slash").is_some());
    // Prefix must align on whole segments
    assert!(matches("comment.li", "comment.line").is_none());
}

#[test]
fn test_pattern_deeper_than_scope_fails() {
    assert!(matches("string.quoted.double", "string.quoted").is_none());
}

#[test]
fn test_ancestor_matching() {
    let scope = "source.python meta.function string.quoted.double";
    assert!(matches("string.quoted", scope).is_some());
    assert!(matches("source string", scope).is_some());
    assert!(matches("source.python meta string", scope).is_some());
    // Order matters: descendants cannot match above ancestors
    assert!(matches("string source", scope).is_none());
}

#[test]
fn test_empty_scope_matches_nothing() {
    assert!(matches("comment", "").is_none());
}

// ========================================================================
// Alternatives and exclusions
// ========================================================================

#[test]
fn test_comma_alternatives() {
    let sel = Selector::parse("keyword, storage").unwrap();
    assert!(sel.matches(&ScopePath::parse("storage.type")).is_some());
    assert!(sel.matches(&ScopePath::parse("keyword.control")).is_some());
    assert!(sel.matches(&ScopePath::parse("variable")).is_none());
}

#[test]
fn test_exclusion_within_group() {
    assert!(matches("string -string.quoted", "string.quoted.double").is_none());
    assert!(matches("string -string.quoted", "string.unquoted").is_some());
}

#[test]
fn test_exclusion_disqualifies_other_alternatives() {
    // The exclusion kills the rule for this scope even though the second
    // alternative matches on its own
    let sel = Selector::parse("string -string.quoted, source").unwrap();
    assert!(sel
        .matches(&ScopePath::parse("source.python string.quoted"))
        .is_none());
    assert!(sel
        .matches(&ScopePath::parse("source.python string.raw"))
        .is_some());
}

#[test]
fn test_exclusion_matches_ancestors_too() {
    assert!(matches("string -source.python", "source.python string.quoted").is_none());
    assert!(matches("string -source.python", "source.rust string.quoted").is_some());
}

// ========================================================================
// Specificity ordering
// ========================================================================

#[test]
fn test_deeper_segments_rank_higher() {
    let scope = "string.quoted.double";
    let s1 = matches("string", scope).unwrap();
    let s2 = matches("string.quoted", scope).unwrap();
    let s3 = matches("string.quoted.double", scope).unwrap();
    assert!(s3 > s2);
    assert!(s2 > s1);
}

#[test]
fn test_atom_count_ranks_over_segment_depth() {
    let scope = "source.python string.quoted.double";
    let chain = matches("source string", scope).unwrap();
    let single = matches("string.quoted.double", scope).unwrap();
    assert!(chain > single);
}

#[test]
fn test_deeper_scope_atom_ranks_higher() {
    // Same pattern shape, but one lands deeper in the path
    let scope = "text.html source.js";
    let shallow = matches("text", scope).unwrap();
    let deep = matches("source", scope).unwrap();
    assert!(deep > shallow);
}

#[test]
fn test_equal_patterns_tie() {
    let scope = "string.quoted";
    assert_eq!(matches("string", scope), matches("string", scope));
}

// ========================================================================
// Parsing
// ========================================================================

#[test]
fn test_parse_rejects_malformed_patterns() {
    assert!(Selector::parse("string.").is_err());
    assert!(Selector::parse(".string").is_err());
    assert!(Selector::parse("a..b").is_err());
    assert!(Selector::parse("string -").is_err());
}

#[test]
fn test_empty_selector_is_valid_but_matches_nothing() {
    let sel = Selector::parse("").unwrap();
    assert!(sel.is_empty());
    assert!(sel.matches(&ScopePath::parse("anything")).is_none());
}

#[test]
fn test_display_round_trips_source_text() {
    let sel = Selector::parse("string -string.quoted, comment").unwrap();
    assert_eq!(sel.to_string(), "string -string.quoted, comment");
}
