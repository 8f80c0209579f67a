//! Engine configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where the permission table lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreLocation {
    /// A SQLite database file.
    File(PathBuf),
    /// A throwaway in-memory SQLite database.
    Memory,
}

/// Configuration for the access-control engine.
///
/// The application's configuration loader embeds this struct; the engine
/// only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AclConfig {
    /// Location of the permission database.
    pub store: StoreLocation,
    /// Configured administrator identities. Only the first one receives the
    /// root grant at bootstrap; all of them see the full table.
    pub admins: Vec<String>,
}

impl AclConfig {
    /// A configuration backed by an in-memory database.
    pub fn in_memory() -> Self {
        Self {
            store: StoreLocation::Memory,
            ..Self::default()
        }
    }

    /// Replace the administrator list.
    pub fn with_admins<I, T>(mut self, admins: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.admins = admins.into_iter().map(Into::into).collect();
        self
    }
}

impl Default for AclConfig {
    fn default() -> Self {
        Self {
            store: StoreLocation::File(PathBuf::from("perms.db")),
            admins: Vec::new(),
        }
    }
}
