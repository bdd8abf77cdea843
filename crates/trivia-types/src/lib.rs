//! # trivia-types
//!
//! Shared domain types for the trivia engine.
//!
//! - Texts: source texts tagged by topic
//! - Keywords: ranked terms extracted from a text
//! - Sessions: the set of texts a game is played over
//! - Sites: registered sources per topic
//! - Settings: configuration types

pub mod config;
pub mod error;
pub mod keyword;
pub mod session;
pub mod site;
pub mod text;

pub use config::{ExtractionSettings, RetrievalSettings, Settings, DEFAULT_TOP_N};
pub use error::TriviaError;
pub use keyword::{Keyword, KeywordId, KeywordSet, Rank, RankedKeyword};
pub use session::{Session, SessionId};
pub use site::{Site, SiteId};
pub use text::{Text, TextId};
