//! Audit error types.

use thiserror::Error;

/// Errors that can occur while appending to an audit store.
///
/// Reading a damaged store is not an error: the store is treated as empty.
/// Only failures to write the new contents surface here.
#[derive(Debug, Error)]
pub enum AuditError {
    /// Failed to create the log directory or write the store.
    #[error("failed to write audit log: {0}")]
    Io(#[from] std::io::Error),
    /// Failed to serialize the event.
    #[error("failed to serialize audit event: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for audit operations.
pub type Result<T> = std::result::Result<T, AuditError>;
