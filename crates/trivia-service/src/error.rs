//! Service error taxonomy.
//!
//! Every operation fails with exactly one of three kinds, so callers can
//! tell "you asked wrong" from "that doesn't exist" from "we broke".

use thiserror::Error;
use tracing::error;

use trivia_keywords::KeywordsError;
use trivia_retrieval::RetrievalError;
use trivia_storage::StorageError;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Missing or malformed request field
    #[error("Bad input: {0}")]
    BadInput(String),

    /// The referenced record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Storage or engine failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn is_bad_input(&self) -> bool {
        matches!(self, ServiceError::BadInput(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::NotFound(_))
    }
}

impl From<StorageError> for ServiceError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(what) => ServiceError::NotFound(what),
            StorageError::InvalidInput(msg) => ServiceError::BadInput(msg),
            other => {
                error!(error = %other, "Storage failure");
                ServiceError::Internal(other.to_string())
            }
        }
    }
}

impl From<KeywordsError> for ServiceError {
    fn from(err: KeywordsError) -> Self {
        match err {
            KeywordsError::Storage(e) => e.into(),
        }
    }
}

impl From<RetrievalError> for ServiceError {
    fn from(err: RetrievalError) -> Self {
        match err {
            RetrievalError::InvalidPattern(msg) => ServiceError::BadInput(msg),
            RetrievalError::Storage(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_errors_map_to_kinds() {
        let err: ServiceError = StorageError::NotFound("session 9".to_string()).into();
        assert!(err.is_not_found());

        let err: ServiceError = StorageError::InvalidInput("empty keyword".to_string()).into();
        assert!(err.is_bad_input());

        let err: ServiceError = StorageError::ColumnFamilyNotFound("texts".to_string()).into();
        assert!(matches!(err, ServiceError::Internal(_)));
    }

    #[test]
    fn test_invalid_pattern_is_bad_input() {
        let err: ServiceError = RetrievalError::InvalidPattern("unclosed group".to_string()).into();
        assert!(err.is_bad_input());
        assert_eq!(err.to_string(), "Bad input: unclosed group");
    }
}
