//! SQLite implementation of the PermissionStore trait.
//!
//! This is the primary storage backend. It uses rusqlite with bundled
//! SQLite, wrapped in async via tokio::spawn_blocking.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};

use wikie_acl_core::{decode_grant_list, encode_grant_list, GrantList};

use crate::error::{Result, StoreError};
use crate::migration::{self, now_millis};
use crate::traits::{GrantListUpdate, PermissionStore, UpdateOutcome, PERMS_BUCKET};

/// SQLite-based store implementation.
///
/// Thread-safe via internal Mutex. All operations use spawn_blocking
/// to avoid blocking the async runtime.
pub struct SqliteStore {
    /// The SQLite connection, protected by a mutex.
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open a SQLite database at the given path.
    ///
    /// Creates the file and runs migrations if it doesn't exist. File
    /// databases use WAL so readers never wait on the writer.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut conn = Connection::open(path)?;
        conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| {
            row.get::<_, String>(0)
        })?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory SQLite database.
    ///
    /// Useful for testing.
    pub fn open_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run `f` against the connection on the blocking thread pool.
    async fn run_blocking<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = self.conn.clone();

        tokio::task::spawn_blocking(move || {
            let mut conn = conn
                .lock()
                .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
            f(&mut conn)
        })
        .await
        .map_err(|e| StoreError::TaskFailed(e.to_string()))?
    }
}

fn bucket_exists(conn: &Connection) -> Result<bool> {
    let found: Option<i64> = conn
        .query_row(
            "SELECT 1 FROM buckets WHERE name = ?1",
            params![PERMS_BUCKET],
            |row| row.get(0),
        )
        .optional()?;
    Ok(found.is_some())
}

fn read_entry(conn: &Connection, user: &str) -> Result<Option<GrantList>> {
    let value: Option<Vec<u8>> = conn
        .query_row(
            "SELECT value FROM entries WHERE bucket = ?1 AND key = ?2",
            params![PERMS_BUCKET, user.as_bytes()],
            |row| row.get(0),
        )
        .optional()?;

    match value {
        Some(bytes) => Ok(Some(decode_grant_list(&bytes)?)),
        None => Ok(None),
    }
}

fn write_entry(conn: &Connection, user: &str, grants: &GrantList) -> Result<()> {
    let encoded = encode_grant_list(grants)?;
    conn.execute(
        "INSERT INTO entries (bucket, key, value) VALUES (?1, ?2, ?3)
         ON CONFLICT (bucket, key) DO UPDATE SET value = excluded.value",
        params![PERMS_BUCKET, user.as_bytes(), encoded.as_ref()],
    )?;
    Ok(())
}

fn require_bucket(conn: &Connection) -> Result<()> {
    if bucket_exists(conn)? {
        Ok(())
    } else {
        Err(StoreError::TableMissing(PERMS_BUCKET.to_string()))
    }
}

#[async_trait]
impl PermissionStore for SqliteStore {
    async fn table_exists(&self) -> Result<bool> {
        self.run_blocking(|conn| bucket_exists(conn)).await
    }

    async fn create_table(&self, seed: Option<(String, GrantList)>) -> Result<bool> {
        self.run_blocking(move |conn| {
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

            if bucket_exists(&tx)? {
                return Ok(false);
            }

            tx.execute(
                "INSERT INTO buckets (name, created_at) VALUES (?1, ?2)",
                params![PERMS_BUCKET, now_millis()],
            )?;

            if let Some((user, grants)) = &seed {
                write_entry(&tx, user, grants)?;
            }

            tx.commit()?;
            tracing::debug!(
                bucket = PERMS_BUCKET,
                seeded = seed.as_ref().map(|(user, _)| user.as_str()),
                "created permission table"
            );
            Ok(true)
        })
        .await
    }

    async fn get(&self, user: &str) -> Result<Option<GrantList>> {
        let user = user.to_string();

        self.run_blocking(move |conn| {
            let tx = conn.transaction()?;
            let grants = read_entry(&tx, &user)?;
            tx.finish()?;
            Ok(grants)
        })
        .await
    }

    async fn put(&self, user: &str, grants: &GrantList) -> Result<()> {
        let user = user.to_string();
        let grants = grants.clone();

        self.run_blocking(move |conn| {
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
            require_bucket(&tx)?;
            write_entry(&tx, &user, &grants)?;
            tx.commit()?;
            tracing::trace!(user = %user, grants = grants.len(), "put grant list");
            Ok(())
        })
        .await
    }

    async fn update(&self, user: &str, f: GrantListUpdate) -> Result<UpdateOutcome> {
        let user = user.to_string();

        self.run_blocking(move |conn| {
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
            require_bucket(&tx)?;

            let current = read_entry(&tx, &user)?;
            match f(current) {
                Some(grants) => {
                    write_entry(&tx, &user, &grants)?;
                    tx.commit()?;
                    tracing::trace!(user = %user, grants = grants.len(), "updated grant list");
                    Ok(UpdateOutcome::Written)
                }
                None => {
                    tx.rollback()?;
                    Ok(UpdateOutcome::Unchanged)
                }
            }
        })
        .await
    }

    async fn iterate(&self) -> Result<Vec<(String, GrantList)>> {
        self.run_blocking(|conn| {
            let tx = conn.transaction()?;

            let rows: Vec<(Vec<u8>, Vec<u8>)> = {
                let mut stmt =
                    tx.prepare("SELECT key, value FROM entries WHERE bucket = ?1 ORDER BY key")?;
                let rows = stmt
                    .query_map(params![PERMS_BUCKET], |row| Ok((row.get(0)?, row.get(1)?)))?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                rows
            };
            tx.finish()?;

            rows.into_iter()
                .map(|(key, value)| {
                    let user = String::from_utf8(key)
                        .map_err(|e| StoreError::InvalidData(format!("user key: {}", e)))?;
                    let grants = decode_grant_list(&value)?;
                    Ok((user, grants))
                })
                .collect()
        })
        .await
    }
}
