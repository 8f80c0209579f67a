//! Grants and grant lists.
//!
//! A grant authorizes one user for one path at one level. A user's grants
//! form an ordered [`GrantList`]; the list order is the order in which
//! grants are tried when checking access.

use serde::{Deserialize, Serialize};

use crate::access::AccessLevel;

/// A single `(path, access)` authorization.
///
/// The path is opaque: no normalization and no trailing-slash handling.
/// Field names are capitalized on the wire to stay compatible with grant
/// lists written by earlier deployments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grant {
    /// The path fragment this grant covers.
    #[serde(rename = "Path")]
    pub path: String,

    /// The level granted.
    #[serde(rename = "Access")]
    pub access: AccessLevel,
}

impl Grant {
    /// Create a new grant.
    pub fn new(path: impl Into<String>, access: AccessLevel) -> Self {
        Self {
            path: path.into(),
            access,
        }
    }

    /// The root grant handed to the bootstrap administrator.
    pub fn root() -> Self {
        Self::new("/", AccessLevel::Read | AccessLevel::Write)
    }

    /// Check whether this grant authorizes `required` access to `path`.
    ///
    /// Matching is substring containment of the grant path inside the
    /// requested path, not a prefix or path-segment test: a grant for
    /// `"doc"` covers `"/secretdocs/x"`.
    pub fn matches(&self, path: &str, required: AccessLevel) -> bool {
        self.access.satisfies(required) && path.contains(self.path.as_str())
    }

    /// Exact equality on both fields, as used by revocation.
    pub fn is_exactly(&self, path: &str, access: AccessLevel) -> bool {
        self.access == access && self.path == path
    }
}

/// The ordered grants owned by one user.
///
/// Duplicates are allowed. An empty list is a valid, present value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GrantList(Vec<Grant>);

impl GrantList {
    /// Create an empty grant list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a grant at the end.
    pub fn push(&mut self, grant: Grant) {
        self.0.push(grant);
    }

    /// Remove the first grant exactly equal to `(path, access)`.
    ///
    /// Returns the removed grant, or `None` if nothing matched. The
    /// relative order of the remaining grants is preserved.
    pub fn remove_exact(&mut self, path: &str, access: AccessLevel) -> Option<Grant> {
        let index = self.0.iter().position(|g| g.is_exactly(path, access))?;
        Some(self.0.remove(index))
    }

    /// The first grant that authorizes `required` access to `path`.
    pub fn find_match(&self, path: &str, required: AccessLevel) -> Option<&Grant> {
        self.0.iter().find(|g| g.matches(path, required))
    }

    /// Whether any grant authorizes `required` access to `path`.
    pub fn permits(&self, path: &str, required: AccessLevel) -> bool {
        self.find_match(path, required).is_some()
    }

    /// Iterate over the grants in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Grant> {
        self.0.iter()
    }

    /// Number of grants.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list holds no grants.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The grants as a slice.
    pub fn as_slice(&self) -> &[Grant] {
        &self.0
    }
}

impl From<Vec<Grant>> for GrantList {
    fn from(grants: Vec<Grant>) -> Self {
        Self(grants)
    }
}

impl FromIterator<Grant> for GrantList {
    fn from_iter<I: IntoIterator<Item = Grant>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for GrantList {
    type Item = Grant;
    type IntoIter = std::vec::IntoIter<Grant>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a GrantList {
    type Item = &'a Grant;
    type IntoIter = std::slice::Iter<'a, Grant>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
