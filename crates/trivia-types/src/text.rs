//! Source texts tagged by topic.
//!
//! A text is written once at ingestion and never modified afterwards.
//! Its keywords are derived at the same time and stored separately.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a stored text.
pub type TextId = u64;

/// A source text belonging to a topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Text {
    /// Unique identifier, allocated by storage
    pub text_id: TextId,

    /// Raw body as submitted
    pub body: String,

    /// Topic the text was filed under
    pub topic: String,

    /// When the text was ingested
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl Text {
    /// Create a new text record.
    pub fn new(text_id: TextId, body: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            text_id,
            body: body.into(),
            topic: topic.into(),
            created_at: Utc::now(),
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_creation() {
        let text = Text::new(7, "The cat sat.", "animals");
        assert_eq!(text.text_id, 7);
        assert_eq!(text.body, "The cat sat.");
        assert_eq!(text.topic, "animals");
    }

    #[test]
    fn test_text_serialization() {
        let text = Text::new(1, "A fox jumped.", "animals");
        let bytes = text.to_bytes().unwrap();
        let decoded = Text::from_bytes(&bytes).unwrap();
        assert_eq!(decoded.text_id, text.text_id);
        assert_eq!(decoded.body, text.body);
        assert_eq!(decoded.created_at.timestamp_millis(), text.created_at.timestamp_millis());
    }
}
