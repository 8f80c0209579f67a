//! The permission table: every known user and their grant list.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::grant::{Grant, GrantList};

/// Mapping from user identity to that user's grants.
///
/// Users are kept in byte-lexicographic order, matching the order the
/// store enumerates them in. A user mapped to an empty list is still a
/// known user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionTable(BTreeMap<String, GrantList>);

impl PermissionTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the grant list for a user, replacing any previous one.
    pub fn insert(&mut self, user: impl Into<String>, grants: GrantList) -> Option<GrantList> {
        self.0.insert(user.into(), grants)
    }

    /// Ensure `user` is present, with an empty list if previously absent.
    pub fn ensure_user(&mut self, user: &str) -> &mut GrantList {
        self.0.entry(user.to_string()).or_default()
    }

    /// Append a grant to a user's list, creating the entry if needed.
    pub fn push(&mut self, user: &str, grant: Grant) {
        self.ensure_user(user).push(grant);
    }

    /// Get the grant list for a user.
    pub fn get(&self, user: &str) -> Option<&GrantList> {
        self.0.get(user)
    }

    /// Whether the user is present (even with no grants).
    pub fn contains_user(&self, user: &str) -> bool {
        self.0.contains_key(user)
    }

    /// Iterate over users in key order.
    pub fn users(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Iterate over `(user, grants)` in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &GrantList)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of known users.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no user is known.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Render the table as JSON for the templating layer.
    ///
    /// Shape: `{"alice": [{"Path": "/", "Access": 3}], "bob": []}`.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| CoreError::EncodingError(e.to_string()))
    }
}

impl FromIterator<(String, GrantList)> for PermissionTable {
    fn from_iter<I: IntoIterator<Item = (String, GrantList)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for PermissionTable {
    type Item = (String, GrantList);
    type IntoIter = std::collections::btree_map::IntoIter<String, GrantList>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
