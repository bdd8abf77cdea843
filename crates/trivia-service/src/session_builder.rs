//! Game session construction.
//!
//! Each requested keyword contributes the text in which it ranks highest
//! for the topic. Keywords with no match are skipped; the build only
//! fails when nothing matched at all.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, info, instrument};
use trivia_storage::{Storage, StorageError};
use trivia_types::{KeywordSet, Session, TextId};

use crate::error::ServiceError;

pub struct SessionBuilder {
    storage: Arc<Storage>,
}

impl SessionBuilder {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    /// Texts selected for `keywords`, one per matched keyword, deduplicated.
    pub fn select_texts(
        &self,
        topic: &str,
        keywords: &KeywordSet,
    ) -> Result<BTreeSet<TextId>, ServiceError> {
        let mut text_ids = BTreeSet::new();
        for keyword in keywords {
            match self.storage.best_text_for(topic, keyword) {
                Ok(text) => {
                    text_ids.insert(text.text_id);
                }
                Err(StorageError::NotFound(_)) => {
                    debug!(topic = %topic, keyword = %keyword, "Skipping unmatched keyword");
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(text_ids)
    }

    /// Create a session over the texts selected for `keywords`.
    #[instrument(skip(self, keywords), fields(keywords = keywords.len()))]
    pub fn build(&self, topic: &str, keywords: &KeywordSet) -> Result<Session, ServiceError> {
        let text_ids = self.select_texts(topic, keywords)?;
        if text_ids.is_empty() {
            return Err(ServiceError::NotFound("no matching texts".to_string()));
        }

        let session = self.storage.save_session(&text_ids)?;
        info!(
            session_id = session.session_id,
            texts = session.text_count(),
            "Started game session"
        );
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn keywords(words: &[&str]) -> KeywordSet {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn setup() -> (Arc<Storage>, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = Arc::new(Storage::open(temp_dir.path()).unwrap());
        (storage, temp_dir)
    }

    #[test]
    fn test_build_picks_highest_rank() {
        let (storage, _temp) = setup();
        let low = storage.save_text("A fox.", "animals").unwrap();
        let high = storage.save_text("Fox, fox, fox.", "animals").unwrap();
        storage
            .save_keywords(low.text_id, "animals", &[("fox".to_string(), 1)])
            .unwrap();
        storage
            .save_keywords(high.text_id, "animals", &[("fox".to_string(), 3)])
            .unwrap();

        let session = SessionBuilder::new(storage)
            .build("animals", &keywords(&["fox"]))
            .unwrap();
        assert_eq!(session.text_ids, BTreeSet::from([high.text_id]));
    }

    #[test]
    fn test_build_collapses_duplicate_texts() {
        let (storage, _temp) = setup();
        let text = storage.save_text("The cat and the dog.", "animals").unwrap();
        storage
            .save_keywords(
                text.text_id,
                "animals",
                &[("cat".to_string(), 1), ("dog".to_string(), 1)],
            )
            .unwrap();

        let session = SessionBuilder::new(storage)
            .build("animals", &keywords(&["cat", "dog"]))
            .unwrap();
        assert_eq!(session.text_count(), 1);
    }

    #[test]
    fn test_build_skips_unmatched_keywords() {
        let (storage, _temp) = setup();
        let text = storage.save_text("The cat sat.", "animals").unwrap();
        storage
            .save_keywords(text.text_id, "animals", &[("cat".to_string(), 1)])
            .unwrap();

        let session = SessionBuilder::new(storage)
            .build("animals", &keywords(&["cat", "unicorn"]))
            .unwrap();
        assert_eq!(session.text_ids, BTreeSet::from([text.text_id]));
    }

    #[test]
    fn test_build_stays_within_topic() {
        let (storage, _temp) = setup();
        let animal = storage.save_text("A rose-eating goat.", "animals").unwrap();
        let plant = storage.save_text("A rose.", "plants").unwrap();
        storage
            .save_keywords(animal.text_id, "animals", &[("rose".to_string(), 9)])
            .unwrap();
        storage
            .save_keywords(plant.text_id, "plants", &[("rose".to_string(), 1)])
            .unwrap();

        let session = SessionBuilder::new(storage)
            .build("plants", &keywords(&["rose"]))
            .unwrap();
        assert_eq!(session.text_ids, BTreeSet::from([plant.text_id]));
    }

    #[test]
    fn test_build_fails_without_matches() {
        let (storage, _temp) = setup();
        let builder = SessionBuilder::new(storage.clone());

        let err = builder.build("animals", &keywords(&["unicorn"])).unwrap_err();
        assert!(err.is_not_found());

        let err = builder.build("animals", &KeywordSet::new()).unwrap_err();
        assert!(err.is_not_found());

        assert_eq!(storage.get_stats().unwrap().session_count, 0);
    }
}
