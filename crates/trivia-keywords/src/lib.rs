//! # trivia-keywords
//!
//! Keyword extraction and topic-level keyword ranking.
//!
//! ## Features
//! - Per-text term-frequency keyword extraction with stop-word filtering
//! - Exact rank sums across every text of a topic
//! - Deterministic ordering (rank descending, then keyword)

pub mod aggregate;
pub mod error;
pub mod extractor;

pub use aggregate::{aggregate_rows, TopicKeywordAggregator};
pub use error::KeywordsError;
pub use extractor::{tokenize, FrequencyExtractor, KeywordExtractor};
