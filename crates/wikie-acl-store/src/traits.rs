//! PermissionStore trait: the abstract interface for grant persistence.
//!
//! This trait allows the engine to be storage-agnostic. Implementations
//! include SQLite (primary) and in-memory (for tests).

use async_trait::async_trait;
use wikie_acl_core::{GrantList, PermissionTable};

use crate::error::Result;

/// Name of the bucket holding the permission table.
pub const PERMS_BUCKET: &str = "perms";

/// A read-modify-write step applied inside a single write transaction.
///
/// Receives the current list (`None` if the user is absent) and returns the
/// list to write back, or `None` to leave the entry untouched.
pub type GrantListUpdate = Box<dyn FnOnce(Option<GrantList>) -> Option<GrantList> + Send>;

/// Result of an [`PermissionStore::update`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// A new value was written for the key.
    Written,
    /// The update declined to write; the entry is unchanged.
    Unchanged,
}

/// The PermissionStore trait: async interface for the permission table.
///
/// All methods are async so the engine can sit inside an async HTTP stack.
/// For SQLite, work runs on `spawn_blocking` to avoid blocking the runtime.
///
/// # Design Notes
///
/// - **Whole-value writes**: `put` replaces the entire list for a key.
/// - **Atomic updates**: `update` reads and writes in one transaction.
/// - **Missing table**: reads see an empty table; writes return
///   [`StoreError::TableMissing`](crate::StoreError::TableMissing).
#[async_trait]
pub trait PermissionStore: Send + Sync {
    // ─────────────────────────────────────────────────────────────────────────
    // Table Lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Whether the permission table has been created.
    async fn table_exists(&self) -> Result<bool>;

    /// Create the permission table if it does not exist.
    ///
    /// When the table is created, `seed` (if any) is written in the same
    /// transaction. Returns `true` if the table was created, `false` if it
    /// already existed (in which case nothing is written).
    async fn create_table(&self, seed: Option<(String, GrantList)>) -> Result<bool>;

    // ─────────────────────────────────────────────────────────────────────────
    // Entry Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Get a user's grant list, or `None` if the user has no entry.
    async fn get(&self, user: &str) -> Result<Option<GrantList>>;

    /// Replace a user's grant list.
    async fn put(&self, user: &str, grants: &GrantList) -> Result<()>;

    /// Read, transform, and write a user's grant list in one transaction.
    async fn update(&self, user: &str, f: GrantListUpdate) -> Result<UpdateOutcome>;

    /// Snapshot of every `(user, grants)` entry in key order.
    async fn iterate(&self) -> Result<Vec<(String, GrantList)>>;
}

/// Extension trait for common store patterns.
pub trait StoreExt: PermissionStore {
    /// Load the whole table as a [`PermissionTable`].
    fn load_table(&self) -> impl std::future::Future<Output = Result<PermissionTable>> + Send;

    /// Get a user's grant list, treating an absent user as an empty list.
    fn grants_or_empty(
        &self,
        user: &str,
    ) -> impl std::future::Future<Output = Result<GrantList>> + Send;
}

impl<S: PermissionStore + ?Sized> StoreExt for S {
    async fn load_table(&self) -> Result<PermissionTable> {
        Ok(self.iterate().await?.into_iter().collect())
    }

    async fn grants_or_empty(&self, user: &str) -> Result<GrantList> {
        Ok(self.get(user).await?.unwrap_or_default())
    }
}
