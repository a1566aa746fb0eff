//! Role normalization vector tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::fs;

use serde::Deserialize;

use labgate_core::role::{normalize_role, role_in, roles_match};

#[derive(Debug, Deserialize)]
struct RoleVector {
    description: String,
    raw: String,
    normalized: String,
}

fn load() -> Vec<RoleVector> {
    let s = fs::read_to_string("tests/vectors/role_normalize.json").unwrap();
    serde_json::from_str(&s).expect("invalid role vectors")
}

#[test]
fn normalize_vectors() {
    for v in load() {
        assert_eq!(normalize_role(&v.raw), v.normalized, "{}", v.description);
    }
}

#[test]
fn equivalent_spellings_match() {
    assert!(roles_match(" role_admin ", "ROLE_admin"));
    assert!(roles_match("admin", "ROLE_ADMIN"));
    assert!(!roles_match("ROLE_USER", "ADMIN"));
}

#[test]
fn empty_roles_never_match() {
    assert!(!roles_match("ROLE_", "ROLE_"));
    assert!(!roles_match("", ""));
}

#[test]
fn membership_in_required_set() {
    assert!(role_in(Some("ROLE_ADMIN"), &["user", "admin"]));
    assert!(!role_in(Some("ROLE_USER"), &["ADMIN"]));
    assert!(!role_in(None, &["ADMIN"]));
    // entries that normalize to nothing are skipped, not wildcards
    assert!(!role_in(Some("ROLE_"), &["", "ROLE_"]));
}

#[test]
fn unknown_required_role_never_matches() {
    assert!(!role_in(Some("ADMIN"), &["SUPERVISOR"]));
}
