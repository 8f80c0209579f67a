//! Read views of the permission table for the management screen.
//!
//! Administrators see everything. Everyone else sees, for every known user,
//! only the grants they could have issued themselves: a grant `g` is
//! visible to `r` iff `r` is authorized for `(g.path, g.access)`.

use std::sync::Arc;

use wikie_acl_core::{GrantList, PermissionTable};
use wikie_acl_store::{PermissionStore, StoreExt};

use crate::checker::AccessChecker;
use crate::error::Result;

/// Produces full or delegated views of the permission table.
pub struct DelegatedView<S> {
    store: Arc<S>,
}

impl<S> Clone for DelegatedView<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: PermissionStore> DelegatedView<S> {
    /// Create a view over `store`.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// The whole table. Callers must restrict this to administrators.
    pub async fn all_grants(&self) -> Result<PermissionTable> {
        Ok(self.store.load_table().await?)
    }

    /// The table as seen by `requesting`.
    ///
    /// Every known user appears, possibly with an empty list. The
    /// requester's own grants are taken from the same snapshot as everyone
    /// else's, so the view is consistent.
    pub async fn visible_grants(&self, requesting: &str) -> Result<PermissionTable> {
        let table = self.store.load_table().await?;
        let own = table.get(requesting).cloned().unwrap_or_default();

        let visible = table
            .into_iter()
            .map(|(user, grants)| {
                let filtered: GrantList = grants
                    .into_iter()
                    .filter(|g| AccessChecker::<S>::evaluate(&own, &g.path, g.access))
                    .collect();
                (user, filtered)
            })
            .collect();

        Ok(visible)
    }
}
