//! The access-control engine: one store, shared by the checker, the
//! administrator and the views.
//!
//! This is what the HTTP layer holds. It also knows the configured
//! administrator list, which the individual components do not.

use std::sync::Arc;

use wikie_acl_core::{AccessLevel, PermissionTable};
use wikie_acl_store::{PermissionStore, SqliteStore};

use crate::admin::{BootstrapOutcome, GrantAdmin};
use crate::checker::AccessChecker;
use crate::config::{AclConfig, StoreLocation};
use crate::error::{AclError, Result};
use crate::view::DelegatedView;

/// The access-control engine.
///
/// Provides a unified API for:
/// - Checking access before page and file operations
/// - Adding and removing grants
/// - Rendering the permission-management views
pub struct AccessControl<S: PermissionStore> {
    /// Configured administrator identities.
    admins: Vec<String>,
    checker: AccessChecker<S>,
    admin: GrantAdmin<S>,
    view: DelegatedView<S>,
}

impl AccessControl<SqliteStore> {
    /// Open the configured database and bootstrap it.
    ///
    /// Failing to open the store is reported as
    /// [`AclError::StoreUnavailable`]; the caller is expected to treat it
    /// as fatal at startup.
    pub async fn open(config: AclConfig) -> Result<Self> {
        let store = match &config.store {
            StoreLocation::File(path) => SqliteStore::open(path),
            StoreLocation::Memory => SqliteStore::open_memory(),
        }
        .map_err(AclError::StoreUnavailable)?;

        let (engine, outcome) = Self::with_store(store, config.admins).await?;
        tracing::info!(?outcome, store = ?config.store, "permission store ready");
        Ok(engine)
    }
}

impl<S: PermissionStore> AccessControl<S> {
    /// Build an engine over an already-open store and bootstrap it.
    pub async fn with_store(store: S, admins: Vec<String>) -> Result<(Self, BootstrapOutcome)> {
        let store = Arc::new(store);
        let engine = Self {
            admins,
            checker: AccessChecker::new(Arc::clone(&store)),
            admin: GrantAdmin::new(Arc::clone(&store)),
            view: DelegatedView::new(store),
        };
        let outcome = engine.admin.bootstrap(engine.admins.as_slice()).await?;
        Ok((engine, outcome))
    }

    /// The access checker.
    pub fn checker(&self) -> &AccessChecker<S> {
        &self.checker
    }

    /// The grant administrator.
    pub fn admin(&self) -> &GrantAdmin<S> {
        &self.admin
    }

    /// The table views.
    pub fn view(&self) -> &DelegatedView<S> {
        &self.view
    }

    /// The configured administrators.
    pub fn admins(&self) -> &[String] {
        &self.admins
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Checks
    // ─────────────────────────────────────────────────────────────────────────

    /// Check whether `user` holds `level` access to `path`.
    pub async fn has_permission(&self, user: &str, path: &str, level: AccessLevel) -> Result<bool> {
        self.checker.has_permission(user, path, level).await
    }

    /// Filter candidate paths down to those `user` may read.
    pub async fn readable_paths<I, P>(&self, user: &str, paths: I) -> Result<Vec<P>>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<str>,
    {
        self.checker.readable_paths(user, paths).await
    }

    /// Whether `user` is a configured administrator.
    pub fn is_admin(&self, user: &str) -> bool {
        self.admins.iter().any(|a| a == user)
    }

    /// Whether `requesting` may add or remove a `{path, level}` grant.
    ///
    /// Administrators may always; anyone else needs that access themselves.
    /// [`add_grant`](Self::add_grant) and [`remove_grant`](Self::remove_grant)
    /// do not call this.
    pub async fn can_manage(&self, requesting: &str, path: &str, level: AccessLevel) -> Result<bool> {
        if self.is_admin(requesting) {
            return Ok(true);
        }
        self.has_permission(requesting, path, level).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Administration
    // ─────────────────────────────────────────────────────────────────────────

    /// Re-run bootstrap. A no-op once the table exists.
    pub async fn bootstrap(&self) -> Result<BootstrapOutcome> {
        self.admin.bootstrap(self.admins.as_slice()).await
    }

    /// Append a grant to `user`.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn add_grant(&self, user: &str, path: &str, level: AccessLevel) -> Result<()> {
        self.admin.add_grant(user, path, level).await
    }

    /// Remove the first grant of `user` exactly equal to `{path, level}`.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn remove_grant(&self, user: &str, path: &str, level: AccessLevel) -> Result<bool> {
        self.admin.remove_grant(user, path, level).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Views
    // ─────────────────────────────────────────────────────────────────────────

    /// The whole table.
    pub async fn all_grants(&self) -> Result<PermissionTable> {
        self.view.all_grants().await
    }

    /// The table filtered to what `requesting` could have granted.
    pub async fn visible_grants(&self, requesting: &str) -> Result<PermissionTable> {
        self.view.visible_grants(requesting).await
    }

    /// The table shown on the permissions page: everything for
    /// administrators, the delegated view for everyone else.
    pub async fn permissions_page(&self, requesting: &str) -> Result<PermissionTable> {
        if self.is_admin(requesting) {
            self.all_grants().await
        } else {
            self.visible_grants(requesting).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wikie_acl_core::Grant;
    use wikie_acl_store::MemoryStore;

    async fn engine(admins: &[&str]) -> AccessControl<MemoryStore> {
        let admins = admins.iter().map(|a| a.to_string()).collect();
        let (engine, _) = AccessControl::with_store(MemoryStore::new(), admins)
            .await
            .unwrap();
        engine
    }

    #[tokio::test]
    async fn test_open_in_memory() {
        let config = AclConfig::in_memory().with_admins(["root"]);
        let acl = AccessControl::open(config).await.unwrap();

        assert!(acl.has_permission("root", "/any/page", AccessLevel::Write).await.unwrap());
    }

    #[tokio::test]
    async fn test_open_unreachable_path_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("perms.db");
        let config = AclConfig {
            store: StoreLocation::File(path),
            admins: vec!["root".into()],
        };

        let err = AccessControl::open(config).await.err().unwrap();
        assert!(matches!(err, AclError::StoreUnavailable(_)));
    }

    #[tokio::test]
    async fn test_second_admin_is_admin_without_grants() {
        let acl = engine(&["root", "ops"]).await;

        assert!(acl.is_admin("ops"));
        assert!(!acl.has_permission("ops", "/", AccessLevel::Read).await.unwrap());
        assert!(acl.can_manage("ops", "/secret", AccessLevel::Write).await.unwrap());
        assert_eq!(acl.permissions_page("ops").await.unwrap(), acl.all_grants().await.unwrap());
    }

    #[tokio::test]
    async fn test_can_manage_delegated() {
        let acl = engine(&["root"]).await;
        acl.add_grant("lead", "/team", AccessLevel::Read).await.unwrap();

        assert!(acl.can_manage("lead", "/team/docs", AccessLevel::Read).await.unwrap());
        assert!(!acl.can_manage("lead", "/team/docs", AccessLevel::Write).await.unwrap());
        assert!(!acl.can_manage("intern", "/team", AccessLevel::Read).await.unwrap());
    }

    #[tokio::test]
    async fn test_permissions_page_delegated() {
        let acl = engine(&["root"]).await;
        acl.add_grant("lead", "/team", AccessLevel::Read).await.unwrap();
        acl.add_grant("dev", "/team/api", AccessLevel::Read).await.unwrap();
        acl.add_grant("dev", "/ops", AccessLevel::Read).await.unwrap();

        let page = acl.permissions_page("lead").await.unwrap();
        assert_eq!(
            page.get("dev").unwrap().as_slice(),
            &[Grant::new("/team/api", AccessLevel::Read)]
        );
        assert!(page.get("root").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_components_share_one_store() {
        let acl = engine(&["root", "ops"]).await;
        assert_eq!(acl.admins(), &["root".to_string(), "ops".to_string()]);

        acl.admin().add_grant("lead", "/team", AccessLevel::Write).await.unwrap();

        assert!(acl.checker().has_permission("lead", "/team/x", AccessLevel::Read).await.unwrap());
        assert!(acl.has_permission("lead", "/team/x", AccessLevel::Write).await.unwrap());
        assert_eq!(acl.view().all_grants().await.unwrap(), acl.all_grants().await.unwrap());
        assert!(acl.view().visible_grants("lead").await.unwrap().contains_user("lead"));
    }

    #[tokio::test]
    async fn test_rebootstrap_is_noop() {
        let acl = engine(&["root"]).await;
        assert_eq!(acl.bootstrap().await.unwrap(), BootstrapOutcome::AlreadyInitialized);
    }
}
