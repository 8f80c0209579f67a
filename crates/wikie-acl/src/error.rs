//! Error types for the access-control engine.
//!
//! Only store failures are errors. "No grant" and "unknown user" are
//! ordinary `false`/empty results.

use thiserror::Error;
use wikie_acl_store::StoreError;

/// Errors that can occur during access-control operations.
#[derive(Debug, Error)]
pub enum AclError {
    /// The backing store cannot be opened or used.
    #[error("permission store unavailable: {0}")]
    StoreUnavailable(#[source] StoreError),

    /// A single transaction failed (I/O, corrupt payload).
    #[error("permission transaction failed: {0}")]
    TransactionFailure(#[source] StoreError),
}

impl AclError {
    /// The underlying store error.
    pub fn store_error(&self) -> &StoreError {
        match self {
            AclError::StoreUnavailable(e) | AclError::TransactionFailure(e) => e,
        }
    }
}

impl From<StoreError> for AclError {
    fn from(e: StoreError) -> Self {
        if e.is_unavailable() {
            AclError::StoreUnavailable(e)
        } else {
            AclError::TransactionFailure(e)
        }
    }
}

/// Result type for access-control operations.
pub type Result<T> = std::result::Result<T, AclError>;
