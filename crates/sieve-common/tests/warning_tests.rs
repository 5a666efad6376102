//! Tests for the deduplicated warning channel.

use sieve_common::warning::{has_warned, warn_once};

#[test]
fn test_warn_once_records_message() {
    warn_once("Test", "first message");
    assert!(has_warned("Test", "first message"));
    assert!(!has_warned("Test", "never emitted"));
}

#[test]
fn test_warnings_are_keyed_by_component() {
    warn_once("Alpha", "shared text");
    assert!(has_warned("Alpha", "shared text"));
    assert!(!has_warned("Beta", "shared text"));
}

#[test]
fn test_repeated_warning_is_idempotent() {
    warn_once("Repeat", "same");
    warn_once("Repeat", "same");
    assert!(has_warned("Repeat", "same"));
}
