//! # trivia-service
//!
//! Game operations for the trivia engine, independent of any transport.
//!
//! Provides:
//! - Text ingestion and topic keyword ranking
//! - Session building from a keyword set
//! - Sentence/paragraph retrieval, pattern search and sentence checks
//! - A three-kind error taxonomy (bad input, not found, internal)
//!
//! Operations are `async` and run on the caller's runtime; storage calls
//! are their only suspension points.

pub mod cache;
pub mod error;
pub mod game;
pub mod parse;
pub mod session_builder;

pub use cache::DocumentCache;
pub use error::ServiceError;
pub use game::GameService;
pub use parse::{parse_keyword_set, parse_session_id};
pub use session_builder::SessionBuilder;
