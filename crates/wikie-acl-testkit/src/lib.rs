//! # Wikie ACL Testkit
//!
//! Testing utilities for the wikie access-control engine.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: engines over each store backend, pre-bootstrapped
//! - **Generators**: proptest strategies for levels, paths, grants, users
//!
//! ## Test Fixtures
//!
//! ```rust
//! use wikie_acl_testkit::fixtures::{memory_engine, seed};
//! use wikie_acl::AccessLevel;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let acl = memory_engine(&["root"]).await;
//! seed(&acl, &[("alice", "/team", AccessLevel::Read)]).await;
//! assert!(acl.has_permission("alice", "/team/x", AccessLevel::Read).await.unwrap());
//! # });
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use wikie_acl_testkit::generators::{grant_list, path, access_level};
//!
//! proptest! {
//!     #[test]
//!     fn removal_never_grows(list in grant_list(8), p in path(), l in access_level()) {
//!         let mut after = list.clone();
//!         after.remove_exact(&p, l);
//!         prop_assert!(after.len() <= list.len());
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::{memory_engine, seed, sqlite_engine, SqliteFileFixture};
pub use generators::{access_level, grant, grant_list, path, user};
