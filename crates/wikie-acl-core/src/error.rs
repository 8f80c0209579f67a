//! Error types for the ACL core.

use thiserror::Error;

/// Errors raised while parsing access levels or encoding grant lists.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid access level: {0}")]
    InvalidAccessLevel(String),

    #[error("unsupported grant list encoding version: {0}")]
    UnsupportedVersion(u8),

    #[error("encoding error: {0}")]
    EncodingError(String),

    #[error("decoding error: {0}")]
    DecodingError(String),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
