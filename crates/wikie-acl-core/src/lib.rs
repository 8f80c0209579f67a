//! # Wikie ACL Core
//!
//! Pure data types for the wikie access-control engine: access levels,
//! grants, per-user grant lists, and the encoding used to persist them.
//!
//! This crate contains no I/O and no storage. It is the vocabulary shared by
//! the store and the engine.
//!
//! ## Key Types
//!
//! - [`AccessLevel`] - Read, Write, or both; compared ordinally
//! - [`Grant`] - A single `(path, access)` authorization
//! - [`GrantList`] - The ordered grants of one user
//! - [`PermissionTable`] - The full user to grant-list mapping
//!
//! ## Matching
//!
//! A grant matches a request when the requested level is not above the
//! granted level *and* the requested path contains the grant path as a
//! substring:
//!
//! ```rust
//! use wikie_acl_core::{AccessLevel, Grant};
//!
//! let grant = Grant::new("/docs", AccessLevel::Read);
//! assert!(grant.matches("/docs/sub/page", AccessLevel::Read));
//! assert!(grant.matches("/other/docs", AccessLevel::Read));
//! assert!(!grant.matches("/docs", AccessLevel::Write));
//! ```
//!
//! ## Encoding
//!
//! Grant lists are stored as a versioned CBOR envelope. See [`codec`].

pub mod access;
pub mod codec;
pub mod error;
pub mod grant;
pub mod table;

pub use access::AccessLevel;
pub use codec::{decode_grant_list, encode_grant_list, ENCODING_VERSION};
pub use error::{CoreError, Result};
pub use grant::{Grant, GrantList};
pub use table::PermissionTable;
