//! Keyword error types.

use thiserror::Error;

/// Errors that can occur during keyword operations.
#[derive(Debug, Error)]
pub enum KeywordsError {
    /// Storage error
    #[error("Storage error: {0}")]
    Storage(#[from] trivia_storage::StorageError),
}
