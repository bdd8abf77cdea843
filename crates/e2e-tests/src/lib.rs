//! End-to-end test infrastructure for the trivia engine.
//!
//! Provides a shared TestHarness and helper functions for E2E tests
//! covering ingestion, ranking, sessions and retrieval.

use std::sync::Arc;

use trivia_keywords::KeywordExtractor;
use trivia_service::GameService;
use trivia_storage::Storage;
use trivia_types::{Rank, Settings, TextId};

/// Shared test harness for E2E tests.
pub struct TestHarness {
    /// Keeps temp dir alive for the lifetime of the harness
    pub _temp_dir: tempfile::TempDir,
    /// Shared storage instance
    pub storage: Arc<Storage>,
    /// Service over `storage`
    pub service: Arc<GameService>,
}

impl TestHarness {
    /// Create a harness with default settings and the frequency extractor.
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        let (temp_dir, storage) = open_storage();
        let service = Arc::new(GameService::new(storage.clone(), &settings));
        Self {
            _temp_dir: temp_dir,
            storage,
            service,
        }
    }

    /// Create a harness whose service uses `extractor`.
    pub fn with_extractor(extractor: Arc<dyn KeywordExtractor>) -> Self {
        let (temp_dir, storage) = open_storage();
        let service = Arc::new(GameService::with_extractor(
            storage.clone(),
            &Settings::default(),
            extractor,
        ));
        Self {
            _temp_dir: temp_dir,
            storage,
            service,
        }
    }

    /// Ingest `(topic, body)` pairs in order, returning their text ids.
    pub async fn ingest_all(&self, texts: &[(&str, &str)]) -> Vec<TextId> {
        let mut ids = Vec::with_capacity(texts.len());
        for (topic, body) in texts {
            let id = self
                .service
                .ingest_text(body, topic)
                .await
                .expect("Failed to ingest text");
            ids.push(id);
        }
        ids
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

fn open_storage() -> (tempfile::TempDir, Arc<Storage>) {
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let storage = Arc::new(Storage::open(temp_dir.path()).expect("Failed to open test storage"));
    (temp_dir, storage)
}

/// Encode keywords as the JSON array the service expects.
pub fn keywords_json(keywords: &[&str]) -> String {
    serde_json::to_string(keywords).expect("Failed to encode keywords")
}

/// Extractor returning the same ranked keywords for every body.
pub struct FixedExtractor(pub Vec<(String, Rank)>);

impl FixedExtractor {
    pub fn new(keywords: &[(&str, Rank)]) -> Self {
        Self(
            keywords
                .iter()
                .map(|(k, r)| (k.to_string(), *r))
                .collect(),
        )
    }
}

impl KeywordExtractor for FixedExtractor {
    fn extract(&self, _body: &str) -> Vec<(String, Rank)> {
        self.0.clone()
    }
}

/// Small corpus over two topics.
pub const ANIMAL_TEXTS: &[(&str, &str)] = &[
    ("animals", "The cat sat. The dog ran. Cats and dogs play."),
    ("animals", "A fox jumped over the dog. The fox ran far."),
    ("animals", "An owl hooted at night. The owl saw a fox."),
    ("plants", "The rose bloomed. A fern grew near the rose."),
];
