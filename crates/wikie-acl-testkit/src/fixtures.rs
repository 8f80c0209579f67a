//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::path::PathBuf;

use tempfile::TempDir;
use wikie_acl::{AccessControl, AccessLevel};
use wikie_acl_store::{MemoryStore, PermissionStore, SqliteStore};

fn owned(admins: &[&str]) -> Vec<String> {
    admins.iter().map(|a| a.to_string()).collect()
}

/// A bootstrapped engine over the in-memory store.
pub async fn memory_engine(admins: &[&str]) -> AccessControl<MemoryStore> {
    let (acl, _) = AccessControl::with_store(MemoryStore::new(), owned(admins))
        .await
        .expect("bootstrap in-memory store");
    acl
}

/// A bootstrapped engine over an in-memory SQLite database.
pub async fn sqlite_engine(admins: &[&str]) -> AccessControl<SqliteStore> {
    let store = SqliteStore::open_memory().expect("open in-memory sqlite");
    let (acl, _) = AccessControl::with_store(store, owned(admins))
        .await
        .expect("bootstrap sqlite store");
    acl
}

/// Add every `(user, path, level)` grant, in order.
pub async fn seed<S: PermissionStore>(acl: &AccessControl<S>, grants: &[(&str, &str, AccessLevel)]) {
    for (user, path, level) in grants {
        acl.add_grant(user, path, *level)
            .await
            .expect("seed grant");
    }
}

/// A SQLite database file in a temporary directory that can be opened
/// repeatedly, to test behavior across restarts.
pub struct SqliteFileFixture {
    dir: TempDir,
}

impl SqliteFileFixture {
    /// Create a fresh temporary directory.
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    /// Path of the database file.
    pub fn path(&self) -> PathBuf {
        self.dir.path().join("perms.db")
    }

    /// Open (and bootstrap) an engine on the database file.
    pub async fn open(&self, admins: &[&str]) -> AccessControl<SqliteStore> {
        let store = SqliteStore::open(self.path()).expect("open sqlite file");
        let (acl, _) = AccessControl::with_store(store, owned(admins))
            .await
            .expect("bootstrap sqlite file");
        acl
    }
}

impl Default for SqliteFileFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_engine_bootstrapped() {
        let acl = memory_engine(&["root"]).await;
        assert!(acl.has_permission("root", "/", AccessLevel::ReadWrite).await.unwrap());
    }

    #[tokio::test]
    async fn test_file_fixture_reopens_same_table() {
        let fixture = SqliteFileFixture::new();

        {
            let acl = fixture.open(&["root"]).await;
            seed(&acl, &[("alice", "/team", AccessLevel::Read)]).await;
        }

        let acl = fixture.open(&["root"]).await;
        assert!(acl.has_permission("alice", "/team", AccessLevel::Read).await.unwrap());
        assert!(fixture.path().exists());
    }
}
