//! Game sessions.
//!
//! A session is the bundle of texts chosen for one game. Its text set is
//! fixed when the session is created.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::text::TextId;

/// Identifier of a game session.
pub type SessionId = u64;

/// A game session referencing the texts it was built from.
///
/// Texts are referenced, not owned: several sessions may share a text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Unique identifier, allocated by storage and never reused
    pub session_id: SessionId,

    /// Texts in this session, in ascending id order
    pub text_ids: BTreeSet<TextId>,

    /// When the session was started
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Create a new session over the given texts. Duplicate ids collapse.
    pub fn new(session_id: SessionId, text_ids: impl IntoIterator<Item = TextId>) -> Self {
        Self {
            session_id,
            text_ids: text_ids.into_iter().collect(),
            created_at: Utc::now(),
        }
    }

    /// Number of distinct texts in the session.
    pub fn text_count(&self) -> usize {
        self.text_ids.len()
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
    fn test_session_collapses_duplicates() {
        let session = Session::new(1, vec![4, 2, 4, 9, 2]);
        assert_eq!(session.text_count(), 3);
        let ids: Vec<TextId> = session.text_ids.iter().copied().collect();
        assert_eq!(ids, vec![2, 4, 9]);
    }

    #[test]
    fn test_session_serialization() {
        let session = Session::new(5, vec![1, 2]);
        let decoded = Session::from_bytes(&session.to_bytes().unwrap()).unwrap();
        assert_eq!(decoded.session_id, 5);
        assert_eq!(decoded.text_ids, session.text_ids);
    }
}
