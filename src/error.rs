//! Error type shared by the persistence, snapshot and config-loading edges.
//!
//! The scheduling core itself is infallible; "nothing to do" is a value, not an error.

/// Errors raised at the edges of the scheduler
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    /// Malformed record or snapshot
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// Configuration rejected by validation
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
    /// SQLite error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    /// JSON error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SchedulerError>;
