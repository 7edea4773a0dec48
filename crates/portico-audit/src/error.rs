//! Error types for audit record handling.

use thiserror::Error;

/// Errors that can occur when handling audit records.
#[derive(Debug, Error)]
pub enum AuditError {
    /// Record serialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for audit operations.
pub type Result<T> = std::result::Result<T, AuditError>;
