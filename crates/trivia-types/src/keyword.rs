//! Keyword rows extracted from texts.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::text::{Text, TextId};

/// Identifier of a stored keyword row.
pub type KeywordId = u64;

/// Relevance score of a keyword. Higher means more relevant.
///
/// Ranks are integers so that topic-level sums are exact.
pub type Rank = u64;

/// A set of keywords requested by players. Order is not significant.
pub type KeywordSet = BTreeSet<String>;

/// A keyword extracted from a single text.
///
/// `topic` is a copy of the owning text's topic, so keywords can be
/// filtered by topic without loading texts. It is only ever set from the
/// owning [`Text`] in [`Keyword::for_text`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyword {
    /// Unique identifier, allocated by storage
    pub keyword_id: KeywordId,

    /// Owning text
    pub text_id: TextId,

    /// Topic of the owning text
    pub topic: String,

    /// The keyword itself
    pub keyword: String,

    /// Relevance of the keyword within its text (always >= 1)
    pub rank: Rank,
}

impl Keyword {
    /// Create a keyword row owned by `text`.
    pub fn for_text(
        keyword_id: KeywordId,
        text: &Text,
        keyword: impl Into<String>,
        rank: Rank,
    ) -> Self {
        Self {
            keyword_id,
            text_id: text.text_id,
            topic: text.topic.clone(),
            keyword: keyword.into(),
            rank,
        }
    }

    /// Serialize to JSON bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Deserialize from JSON bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

/// A keyword with its rank summed across every text of a topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedKeyword {
    pub keyword: String,
    pub total_rank: Rank,
}

impl RankedKeyword {
    pub fn new(keyword: impl Into<String>, total_rank: Rank) -> Self {
        Self {
            keyword: keyword.into(),
            total_rank,
        }
    }
}
