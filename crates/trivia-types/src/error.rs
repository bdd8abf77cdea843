//! Error types shared by the trivia-engine crates.

use thiserror::Error;

/// Unified error type for domain-level operations.
#[derive(Debug, Error)]
pub enum TriviaError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
