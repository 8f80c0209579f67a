//! # Wikie ACL
//!
//! The access-control engine of the wikie wiki: path grants with ordinal
//! access levels, persisted per user, with delegated administration.
//!
//! ## Overview
//!
//! The web layer authenticates a user and then asks this engine one
//! question before every page or file operation: *may `user` perform
//! `level` on `path`?* Administrators and delegated users manage grants
//! through the same engine.
//!
//! - **AccessChecker**: answers `(user, path, level)` queries
//! - **GrantAdmin**: bootstraps the table, adds and removes grants
//! - **DelegatedView**: the full table, or the part a user could have granted
//! - **AccessControl**: owns the store and the admin list, wires the above
//!
//! ## Key Concepts
//!
//! - **Containment**: a grant for `"/docs"` covers any path *containing*
//!   `"/docs"`, including `"/other/docs"`.
//! - **Ordinal levels**: `Read = 1`, `Write = 2`, `ReadWrite = 3`; a grant
//!   satisfies a request when its level is numerically `>=` the request.
//! - **Exact removal**: revocation removes the first grant equal in both
//!   path and level.
//! - **Bootstrap**: on first start only the first configured administrator
//!   receives the root grant.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use wikie_acl::{AccessControl, AclConfig};
//! use wikie_acl::core::AccessLevel;
//!
//! async fn example() {
//!     let config = AclConfig::default().with_admins(["root"]);
//!     let acl = AccessControl::open(config).await.unwrap();
//!
//!     acl.add_grant("alice", "/team", AccessLevel::Read).await.unwrap();
//!
//!     assert!(acl
//!         .has_permission("alice", "/team/notes", AccessLevel::Read)
//!         .await
//!         .unwrap());
//!     assert!(!acl
//!         .has_permission("alice", "/team/notes", AccessLevel::Write)
//!         .await
//!         .unwrap());
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `wikie_acl::core` - Access levels, grants, encoding
//! - `wikie_acl::store` - Storage trait, SQLite and in-memory stores

pub mod admin;
pub mod checker;
pub mod config;
pub mod engine;
pub mod error;
pub mod view;

// Re-export component crates
pub use wikie_acl_core as core;
pub use wikie_acl_store as store;

pub use admin::{BootstrapOutcome, GrantAdmin};
pub use checker::AccessChecker;
pub use config::{AclConfig, StoreLocation};
pub use engine::AccessControl;
pub use error::{AclError, Result};
pub use view::DelegatedView;

// Re-export commonly used core types
pub use wikie_acl_core::{AccessLevel, Grant, GrantList, PermissionTable};
