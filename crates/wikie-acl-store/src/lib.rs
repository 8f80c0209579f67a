//! # Wikie ACL Store
//!
//! Durable storage for the permission table. Provides a trait-based
//! interface with SQLite and in-memory implementations.
//!
//! ## Overview
//!
//! The permission table is one logical bucket (`"perms"`) of key/value
//! entries: the key is a user identity, the value is that user's encoded
//! [`GrantList`](wikie_acl_core::GrantList). The store knows nothing about
//! what grants mean.
//!
//! ## Key Types
//!
//! - [`PermissionStore`] - The async trait for all storage operations
//! - [`SqliteStore`] - SQLite-based persistent storage
//! - [`MemoryStore`] - In-memory storage for tests
//! - [`UpdateOutcome`] - Result of a read-modify-write transaction
//!
//! ## Usage
//!
//! ```rust,no_run
//! use wikie_acl_core::{AccessLevel, Grant, GrantList};
//! use wikie_acl_store::{PermissionStore, SqliteStore};
//!
//! async fn example() {
//!     let store = SqliteStore::open("perms.db").unwrap();
//!
//!     // The table must exist before anything can be written.
//!     store.create_table(None).await.unwrap();
//!
//!     let grants: GrantList = vec![Grant::new("/team", AccessLevel::Read)].into();
//!     store.put("alice", &grants).await.unwrap();
//!
//!     let loaded = store.get("alice").await.unwrap();
//!     assert_eq!(loaded, Some(grants));
//! }
//! ```
//!
//! ## Design Notes
//!
//! - **Single writer**: write transactions are `BEGIN IMMEDIATE`; readers see
//!   a consistent snapshot.
//! - **Missing table**: reads behave as if the table were empty, writes fail.
//! - **Key order**: keys are stored as BLOBs, so enumeration is
//!   byte-lexicographic.

pub mod error;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::{GrantListUpdate, PermissionStore, StoreExt, UpdateOutcome, PERMS_BUCKET};
