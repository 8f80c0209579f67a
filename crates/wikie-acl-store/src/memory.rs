//! In-memory implementation of the PermissionStore trait.
//!
//! This is primarily for testing. It has the same semantics as SQLite
//! (including encoding every value) but keeps everything in memory.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use bytes::Bytes;

use wikie_acl_core::{decode_grant_list, encode_grant_list, GrantList};

use crate::error::{Result, StoreError};
use crate::traits::{GrantListUpdate, PermissionStore, UpdateOutcome, PERMS_BUCKET};

/// In-memory store implementation.
///
/// All data is lost when the store is dropped. Thread-safe via RwLock:
/// one writer or any number of readers.
pub struct MemoryStore {
    /// `None` until the table is created.
    inner: RwLock<Option<BTreeMap<String, Bytes>>>,
}

impl MemoryStore {
    /// Create a new store with no permission table.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(None),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Option<BTreeMap<String, Bytes>>>> {
        self.inner
            .read()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Option<BTreeMap<String, Bytes>>>> {
        self.inner
            .write()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn missing() -> StoreError {
    StoreError::TableMissing(PERMS_BUCKET.to_string())
}

#[async_trait]
impl PermissionStore for MemoryStore {
    async fn table_exists(&self) -> Result<bool> {
        Ok(self.read()?.is_some())
    }

    async fn create_table(&self, seed: Option<(String, GrantList)>) -> Result<bool> {
        let mut inner = self.write()?;
        if inner.is_some() {
            return Ok(false);
        }

        let mut entries = BTreeMap::new();
        if let Some((user, grants)) = seed {
            entries.insert(user, encode_grant_list(&grants)?);
        }
        *inner = Some(entries);
        Ok(true)
    }

    async fn get(&self, user: &str) -> Result<Option<GrantList>> {
        let inner = self.read()?;
        match inner.as_ref().and_then(|entries| entries.get(user)) {
            Some(bytes) => Ok(Some(decode_grant_list(bytes)?)),
            None => Ok(None),
        }
    }

    async fn put(&self, user: &str, grants: &GrantList) -> Result<()> {
        let encoded = encode_grant_list(grants)?;
        let mut inner = self.write()?;
        let entries = inner.as_mut().ok_or_else(missing)?;
        entries.insert(user.to_string(), encoded);
        Ok(())
    }

    async fn update(&self, user: &str, f: GrantListUpdate) -> Result<UpdateOutcome> {
        let mut inner = self.write()?;
        let entries = inner.as_mut().ok_or_else(missing)?;

        let current = match entries.get(user) {
            Some(bytes) => Some(decode_grant_list(bytes)?),
            None => None,
        };

        match f(current) {
            Some(grants) => {
                entries.insert(user.to_string(), encode_grant_list(&grants)?);
                Ok(UpdateOutcome::Written)
            }
            None => Ok(UpdateOutcome::Unchanged),
        }
    }

    async fn iterate(&self) -> Result<Vec<(String, GrantList)>> {
        let inner = self.read()?;
        let Some(entries) = inner.as_ref() else {
            return Ok(Vec::new());
        };

        entries
            .iter()
            .map(|(user, bytes)| Ok((user.clone(), decode_grant_list(bytes)?)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wikie_acl_core::{AccessLevel, Grant};

    #[tokio::test]
    async fn test_memory_store_basic() {
        let store = MemoryStore::new();
        assert!(store.create_table(None).await.unwrap());

        let list: GrantList = vec![Grant::new("/a", AccessLevel::Read)].into();
        store.put("alice", &list).await.unwrap();

        assert_eq!(store.get("alice").await.unwrap(), Some(list));
        assert_eq!(store.get("bob").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_memory_store_missing_table() {
        let store = MemoryStore::new();

        assert_eq!(store.get("alice").await.unwrap(), None);
        assert!(store.iterate().await.unwrap().is_empty());
        assert!(matches!(
            store.put("alice", &GrantList::new()).await,
            Err(StoreError::TableMissing(_))
        ));
    }

    #[tokio::test]
    async fn test_memory_store_update() {
        let store = MemoryStore::new();
        store.create_table(None).await.unwrap();

        let outcome = store
            .update(
                "alice",
                Box::new(|current| {
                    let mut grants = current.unwrap_or_default();
                    grants.push(Grant::root());
                    Some(grants)
                }),
            )
            .await
            .unwrap();
        assert_eq!(outcome, UpdateOutcome::Written);

        let outcome = store.update("alice", Box::new(|_| None)).await.unwrap();
        assert_eq!(outcome, UpdateOutcome::Unchanged);

        let list = store.get("alice").await.unwrap().unwrap();
        assert_eq!(list.as_slice(), &[Grant::root()]);
    }
}
