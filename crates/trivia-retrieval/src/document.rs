//! Session document aggregation.
//!
//! A session's document is derived from its texts on every request:
//! bodies joined with a single newline in ascending text id order.

use std::sync::Arc;

use tracing::{debug, warn};
use trivia_storage::{Storage, StorageError};
use trivia_types::{Session, Text};

use crate::error::RetrievalError;

/// Separator placed between text bodies.
pub const TEXT_SEPARATOR: &str = "\n";

/// Join text bodies into one document, ordered by text id.
pub fn aggregate_document<'a>(texts: impl IntoIterator<Item = &'a Text>) -> String {
    let mut texts: Vec<&Text> = texts.into_iter().collect();
    texts.sort_by_key(|t| t.text_id);
    texts
        .iter()
        .map(|t| t.body.as_str())
        .collect::<Vec<_>>()
        .join(TEXT_SEPARATOR)
}

/// Loads a session's texts from storage and aggregates them.
pub struct DocumentAssembler {
    storage: Arc<Storage>,
}

impl DocumentAssembler {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    /// Aggregated document of `session`.
    ///
    /// Texts deleted since the session was built are skipped.
    pub fn assemble(&self, session: &Session) -> Result<String, RetrievalError> {
        let mut texts = Vec::with_capacity(session.text_count());
        for &text_id in &session.text_ids {
            match self.storage.get_text(text_id) {
                Ok(text) => texts.push(text),
                Err(StorageError::NotFound(_)) => {
                    warn!(
                        session_id = session.session_id,
                        text_id,
                        "Session text no longer exists"
                    );
                }
                Err(e) => return Err(e.into()),
            }
        }

        let document = aggregate_document(&texts);
        debug!(
            session_id = session.session_id,
            texts = texts.len(),
            bytes = document.len(),
            "Assembled session document"
        );
        Ok(document)
    }
}
