//! # trivia-retrieval
//!
//! Retrieval over the aggregated text of a game session.
//!
//! ## Core Concepts
//!
//! - **Aggregated document**: the bodies of a session's texts joined by
//!   newlines in ascending text id order
//! - **Segmenter**: splits a document into sentences or paragraphs
//! - **Keyword score**: how many requested keywords occur in a unit as a
//!   case-sensitive substring
//!
//! ## Usage
//!
//! ```rust,ignore
//! use trivia_retrieval::{DocumentAssembler, RetrievalEngine};
//!
//! let document = DocumentAssembler::new(storage).assemble(&session)?;
//! let engine = RetrievalEngine::new();
//! let top = engine.top_sentences(&document, &keywords, 2);
//! let hits = engine.find_matching(&document, "f.x")?;
//! ```

pub mod document;
pub mod engine;
pub mod error;
pub mod segmenter;

pub use document::{aggregate_document, DocumentAssembler, TEXT_SEPARATOR};
pub use engine::{keyword_score, RetrievalEngine};
pub use error::RetrievalError;
pub use segmenter::{ParagraphSegmenter, Segmenter, SentenceSegmenter};
