//! Grant administration: bootstrap, add, remove.
//!
//! None of these operations check the *caller's* authority; the HTTP layer
//! does that (see [`AccessControl::can_manage`](crate::AccessControl::can_manage))
//! before invoking them.

use std::sync::Arc;

use wikie_acl_core::{AccessLevel, Grant, GrantList};
use wikie_acl_store::{PermissionStore, UpdateOutcome};

use crate::error::Result;

/// What [`GrantAdmin::bootstrap`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// The table was created. `seeded` names the administrator that received
    /// the root grant, if any admin was configured.
    Created { seeded: Option<String> },
    /// The table already existed; nothing was written.
    AlreadyInitialized,
}

/// Mutates the permission table.
pub struct GrantAdmin<S> {
    store: Arc<S>,
}

impl<S> Clone for GrantAdmin<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: PermissionStore> GrantAdmin<S> {
    /// Create an administrator over `store`.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Create the permission table on first start.
    ///
    /// Only the **first** identity in `admins` receives the root grant
    /// `{"/", Read|Write}`; the others get no entry. Calling this on an
    /// existing table does nothing.
    pub async fn bootstrap<A: AsRef<str>>(&self, admins: &[A]) -> Result<BootstrapOutcome> {
        let seeded = admins.first().map(|a| a.as_ref().to_string());
        let seed = seeded
            .clone()
            .map(|admin| (admin, GrantList::from(vec![Grant::root()])));

        if !self.store.create_table(seed).await? {
            tracing::debug!("permission table already initialized");
            return Ok(BootstrapOutcome::AlreadyInitialized);
        }

        if admins.len() > 1 {
            tracing::debug!(
                seeded = seeded.as_deref(),
                skipped = admins.len() - 1,
                "root grant written for first administrator only"
            );
        } else {
            tracing::debug!(seeded = seeded.as_deref(), "permission table created");
        }
        Ok(BootstrapOutcome::Created { seeded })
    }

    /// Append `{path, level}` to `user`'s grants.
    ///
    /// Creates the user's entry if absent. Duplicates are not collapsed.
    pub async fn add_grant(&self, user: &str, path: &str, level: AccessLevel) -> Result<()> {
        let grant = Grant::new(path, level);
        self.store
            .update(
                user,
                Box::new(move |current| {
                    let mut grants = current.unwrap_or_default();
                    grants.push(grant);
                    Some(grants)
                }),
            )
            .await?;

        tracing::debug!(user, path, %level, "grant added");
        Ok(())
    }

    /// Remove the first grant of `user` exactly equal to `{path, level}`.
    ///
    /// Equality is exact on both fields. Returns whether a grant was
    /// removed; a missing grant or user is not an error.
    pub async fn remove_grant(&self, user: &str, path: &str, level: AccessLevel) -> Result<bool> {
        let target = path.to_string();
        let outcome = self
            .store
            .update(
                user,
                Box::new(move |current| {
                    let mut grants = current?;
                    grants.remove_exact(&target, level)?;
                    Some(grants)
                }),
            )
            .await?;

        let removed = outcome == UpdateOutcome::Written;
        tracing::debug!(user, path, %level, removed, "grant removal");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wikie_acl_store::{MemoryStore, SqliteStore};

    fn admin_over<S: PermissionStore>(store: S) -> (GrantAdmin<S>, Arc<S>) {
        let store = Arc::new(store);
        (GrantAdmin::new(Arc::clone(&store)), store)
    }

    #[tokio::test]
    async fn test_bootstrap_seeds_first_admin_only() {
        let (admin, store) = admin_over(MemoryStore::new());

        let outcome = admin.bootstrap(&["root", "ops"]).await.unwrap();
        assert_eq!(
            outcome,
            BootstrapOutcome::Created {
                seeded: Some("root".to_string())
            }
        );

        let root = store.get("root").await.unwrap().unwrap();
        assert_eq!(root.as_slice(), &[Grant::root()]);
        assert!(store.get("ops").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_bootstrap_idempotent() {
        let (admin, store) = admin_over(SqliteStore::open_memory().unwrap());

        admin.bootstrap(&["root"]).await.unwrap();
        let first = store.iterate().await.unwrap();

        let outcome = admin.bootstrap(&["root"]).await.unwrap();
        assert_eq!(outcome, BootstrapOutcome::AlreadyInitialized);
        assert_eq!(store.iterate().await.unwrap(), first);

        // A different admin list on restart does not reseed either.
        admin.bootstrap(&["someone-else"]).await.unwrap();
        assert_eq!(store.iterate().await.unwrap(), first);
    }

    #[tokio::test]
    async fn test_bootstrap_without_admins_creates_empty_table() {
        let (admin, store) = admin_over(MemoryStore::new());

        let outcome = admin.bootstrap::<&str>(&[]).await.unwrap();
        assert_eq!(outcome, BootstrapOutcome::Created { seeded: None });
        assert!(store.table_exists().await.unwrap());
        assert!(store.iterate().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_grant_appends_duplicates() {
        let (admin, store) = admin_over(MemoryStore::new());
        admin.bootstrap(&["root"]).await.unwrap();

        admin.add_grant("bob", "/x", AccessLevel::Read).await.unwrap();
        admin.add_grant("bob", "/x", AccessLevel::Read).await.unwrap();
        admin.add_grant("bob", "/y", AccessLevel::Write).await.unwrap();

        let bob = store.get("bob").await.unwrap().unwrap();
        assert_eq!(
            bob.as_slice(),
            &[
                Grant::new("/x", AccessLevel::Read),
                Grant::new("/x", AccessLevel::Read),
                Grant::new("/y", AccessLevel::Write),
            ]
        );
    }

    #[tokio::test]
    async fn test_remove_grant_exact_match() {
        let (admin, store) = admin_over(MemoryStore::new());
        admin.bootstrap(&["root"]).await.unwrap();

        admin.add_grant("u", "/x", AccessLevel::Write).await.unwrap();
        admin.add_grant("u", "/x", AccessLevel::Read).await.unwrap();

        assert!(admin.remove_grant("u", "/x", AccessLevel::Write).await.unwrap());
        let u = store.get("u").await.unwrap().unwrap();
        assert_eq!(u.as_slice(), &[Grant::new("/x", AccessLevel::Read)]);

        // Non-matching level or path is a silent no-op.
        assert!(!admin.remove_grant("u", "/x", AccessLevel::ReadWrite).await.unwrap());
        assert!(!admin.remove_grant("u", "/x/y", AccessLevel::Read).await.unwrap());
        assert!(!admin.remove_grant("nobody", "/x", AccessLevel::Read).await.unwrap());
        assert!(store.get("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_remove_last_grant_leaves_empty_entry() {
        let (admin, store) = admin_over(MemoryStore::new());
        admin.bootstrap(&["root"]).await.unwrap();

        admin.add_grant("u", "/x", AccessLevel::Read).await.unwrap();
        admin.remove_grant("u", "/x", AccessLevel::Read).await.unwrap();

        assert_eq!(store.get("u").await.unwrap(), Some(GrantList::new()));
    }

    #[tokio::test]
    async fn test_add_before_bootstrap_is_unavailable() {
        let (admin, _store) = admin_over(MemoryStore::new());

        let err = admin
            .add_grant("u", "/x", AccessLevel::Read)
            .await
            .unwrap_err();
        assert!(matches!(err, crate::AclError::StoreUnavailable(_)));
    }
}
