//! Retrieval error types.

use thiserror::Error;

/// Errors that can occur during retrieval.
#[derive(Debug, Error)]
pub enum RetrievalError {
    /// The search pattern is not a valid regular expression
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    /// Storage error while loading session texts
    #[error("Storage error: {0}")]
    Storage(#[from] trivia_storage::StorageError),
}

impl From<regex::Error> for RetrievalError {
    fn from(err: regex::Error) -> Self {
        RetrievalError::InvalidPattern(err.to_string())
    }
}
