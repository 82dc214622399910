//! Error types for host-side metadata operations.

use metafield_core::FieldError;
use thiserror::Error;

/// Errors that can occur in the host store, configuration, or catalog.
#[derive(Debug, Error)]
pub enum HostError {
    /// The metadata key is not well-formed.
    #[error("invalid metadata key: {key}: {reason}")]
    InvalidKey { key: String, reason: String },

    /// A field with this key is already registered.
    #[error("metadata key already registered: {key}")]
    DuplicateKey { key: String },

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// A typed field read failed.
    #[error(transparent)]
    Field(#[from] FieldError),
}

impl From<serde_json::Error> for HostError {
    fn from(err: serde_json::Error) -> Self {
        HostError::Serialization(err.to_string())
    }
}

/// Convenience type alias for host operations.
pub type Result<T> = std::result::Result<T, HostError>;
