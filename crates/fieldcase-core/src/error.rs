//! Error types for fieldcase-core

use thiserror::Error;

/// Result type alias using fieldcase-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in fieldcase-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Repository I/O failure; aborts a running sync pass
    #[error("Repository error: {0}")]
    Repository(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Record not found
    #[error("Record not found: {0}")]
    NotFound(String),

    /// Record missing required fields; skipped and counted during a pass
    #[error("Malformed record {id}: {reason}")]
    MalformedRecord { id: String, reason: String },

    /// Conflict policy callback failed for one record
    #[error("Conflict policy failed for record {id}: {reason}")]
    Policy { id: String, reason: String },

    /// A sync pass is already in flight for this engine
    #[error("A sync pass is already running")]
    SyncInProgress,

    /// The pass was cancelled between per-record steps
    #[error("Sync pass cancelled")]
    Cancelled,

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Build a malformed-record error for the given record id.
    pub fn malformed(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            id: id.into(),
            reason: reason.into(),
        }
    }
}
