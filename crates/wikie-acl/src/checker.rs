//! Access checks.
//!
//! A user is authorized for `(path, level)` when any of their grants, tried
//! in list order, has `grant.access >= level` and a path that occurs as a
//! substring of `path`.

use std::sync::Arc;

use wikie_acl_core::{AccessLevel, GrantList};
use wikie_acl_store::{PermissionStore, StoreExt};

use crate::error::Result;

/// Decides whether a user may perform an operation on a path.
pub struct AccessChecker<S> {
    store: Arc<S>,
}

impl<S> Clone for AccessChecker<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: PermissionStore> AccessChecker<S> {
    /// Create a checker reading from `store`.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Check whether `user` holds `required` access to `path`.
    ///
    /// An unknown user has no grants and is simply not authorized; only
    /// store failures are errors.
    pub async fn has_permission(
        &self,
        user: &str,
        path: &str,
        required: AccessLevel,
    ) -> Result<bool> {
        let grants = self.store.grants_or_empty(user).await?;
        let granted = Self::evaluate(&grants, path, required);
        tracing::trace!(user, path, %required, granted, "access check");
        Ok(granted)
    }

    /// Filter `paths` down to those `user` may read.
    ///
    /// Reads the user's grants once and applies the same rule as
    /// [`has_permission`](Self::has_permission) at [`AccessLevel::Read`].
    /// Input order is preserved.
    pub async fn readable_paths<I, P>(&self, user: &str, paths: I) -> Result<Vec<P>>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<str>,
    {
        let grants = self.store.grants_or_empty(user).await?;
        Ok(paths
            .into_iter()
            .filter(|p| Self::evaluate(&grants, p.as_ref(), AccessLevel::Read))
            .collect())
    }

    /// The authorization rule, applied to an already-loaded grant list.
    pub fn evaluate(grants: &GrantList, path: &str, required: AccessLevel) -> bool {
        grants.permits(path, required)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wikie_acl_core::Grant;
    use wikie_acl_store::MemoryStore;

    async fn checker_with(user: &str, grants: Vec<Grant>) -> AccessChecker<MemoryStore> {
        let store = MemoryStore::new();
        store.create_table(None).await.unwrap();
        store.put(user, &grants.into()).await.unwrap();
        AccessChecker::new(Arc::new(store))
    }

    #[tokio::test]
    async fn test_containment_matching() {
        let checker = checker_with("u", vec![Grant::new("/docs", AccessLevel::Read)]).await;

        assert!(checker.has_permission("u", "/docs/sub/page", AccessLevel::Read).await.unwrap());
        assert!(checker.has_permission("u", "/other/docs", AccessLevel::Read).await.unwrap());
        assert!(!checker.has_permission("u", "/doc", AccessLevel::Read).await.unwrap());
    }

    #[tokio::test]
    async fn test_ordinal_levels() {
        let checker = checker_with(
            "u",
            vec![
                Grant::new("/both", AccessLevel::ReadWrite),
                Grant::new("/ro", AccessLevel::Read),
            ],
        )
        .await;

        assert!(checker.has_permission("u", "/both", AccessLevel::Read).await.unwrap());
        assert!(checker.has_permission("u", "/both", AccessLevel::Write).await.unwrap());
        assert!(checker.has_permission("u", "/ro", AccessLevel::Read).await.unwrap());
        assert!(!checker.has_permission("u", "/ro", AccessLevel::Write).await.unwrap());
    }

    #[tokio::test]
    async fn test_unknown_user_is_denied_not_error() {
        let checker = checker_with("u", vec![Grant::root()]).await;

        let granted = checker
            .has_permission("no-such-user", "/x", AccessLevel::Read)
            .await
            .unwrap();
        assert!(!granted);
    }

    #[tokio::test]
    async fn test_uninitialized_table_denies() {
        let checker = AccessChecker::new(Arc::new(MemoryStore::new()));

        let granted = checker.has_permission("u", "/", AccessLevel::Read).await.unwrap();
        assert!(!granted);
    }

    #[tokio::test]
    async fn test_readable_paths() {
        let checker = checker_with(
            "u",
            vec![
                Grant::new("storage/team", AccessLevel::Read),
                Grant::new("storage/drafts", AccessLevel::Write),
            ],
        )
        .await;

        let files = vec![
            "storage/team/a.png",
            "storage/private/b.pdf",
            "storage/drafts/c.txt",
            "storage/team/d.md",
        ];
        let readable = checker.readable_paths("u", files).await.unwrap();

        // Write (2) satisfies Read (1) ordinally.
        assert_eq!(
            readable,
            vec!["storage/team/a.png", "storage/drafts/c.txt", "storage/team/d.md"]
        );

        let none = checker
            .readable_paths("stranger", vec!["storage/team/a.png"])
            .await
            .unwrap();
        assert!(none.is_empty());
    }
}
