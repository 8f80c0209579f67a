//! Proptest generators for property-based testing.

use proptest::prelude::*;

use wikie_acl_core::{AccessLevel, Grant, GrantList};

/// Generate any valid access level.
pub fn access_level() -> impl Strategy<Value = AccessLevel> {
    prop_oneof![
        Just(AccessLevel::Read),
        Just(AccessLevel::Write),
        Just(AccessLevel::ReadWrite),
    ]
}

/// Generate a wiki-style path such as `/team/docs` (or just `/`).
///
/// The alphabet is small so that generated paths often contain one
/// another, which is where containment matching gets interesting.
pub fn path() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-c]{1,3}", 0..=3).prop_map(|segments| {
        if segments.is_empty() {
            "/".to_string()
        } else {
            format!("/{}", segments.join("/"))
        }
    })
}

/// Generate a user identity.
pub fn user() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_.-]{0,11}".prop_map(String::from)
}

/// Generate a single grant.
pub fn grant() -> impl Strategy<Value = Grant> {
    (path(), access_level()).prop_map(|(path, access)| Grant::new(path, access))
}

/// Generate a grant list of up to `max_len` grants.
pub fn grant_list(max_len: usize) -> impl Strategy<Value = GrantList> {
    prop::collection::vec(grant(), 0..=max_len).prop_map(GrantList::from)
}
