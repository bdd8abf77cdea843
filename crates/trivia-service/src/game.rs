//! Game operations.
//!
//! Provides:
//! - Text ingestion with keyword extraction
//! - Topic keyword ranking
//! - Session start and session-scoped retrieval
//! - Site registry, text lookup/deletion and admin operations

use std::sync::Arc;

use tracing::{debug, info};

use trivia_keywords::{FrequencyExtractor, KeywordExtractor, TopicKeywordAggregator};
use trivia_retrieval::{DocumentAssembler, RetrievalEngine};
use trivia_storage::{Storage, StorageStats};
use trivia_types::{RankedKeyword, Session, SessionId, Settings, Site, Text, TextId};

use crate::cache::DocumentCache;
use crate::error::ServiceError;
use crate::parse::{parse_keyword_set, required};
use crate::session_builder::SessionBuilder;

/// Entry point for every game operation.
pub struct GameService {
    storage: Arc<Storage>,
    extractor: Arc<dyn KeywordExtractor>,
    aggregator: TopicKeywordAggregator,
    sessions: SessionBuilder,
    assembler: DocumentAssembler,
    engine: RetrievalEngine,
    cache: DocumentCache,
    top_n: usize,
}

impl GameService {
    /// Create a service using the frequency extractor configured in `settings`.
    pub fn new(storage: Arc<Storage>, settings: &Settings) -> Self {
        let extractor = Arc::new(FrequencyExtractor::new(&settings.extraction));
        Self::with_extractor(storage, settings, extractor)
    }

    pub fn with_extractor(
        storage: Arc<Storage>,
        settings: &Settings,
        extractor: Arc<dyn KeywordExtractor>,
    ) -> Self {
        Self {
            aggregator: TopicKeywordAggregator::new(storage.clone()),
            sessions: SessionBuilder::new(storage.clone()),
            assembler: DocumentAssembler::new(storage.clone()),
            engine: RetrievalEngine::new(),
            cache: DocumentCache::new(settings.retrieval.document_cache_size),
            top_n: settings.retrieval.top_n,
            extractor,
            storage,
        }
    }

    pub fn storage(&self) -> &Arc<Storage> {
        &self.storage
    }

    // ==================== Texts ====================

    /// Store a text and its extracted keywords. Returns the new text id.
    ///
    /// A text that yields no keywords is still stored. If any extracted
    /// keyword is rejected, nothing is stored.
    pub async fn ingest_text(&self, body: &str, topic: &str) -> Result<TextId, ServiceError> {
        let body = required("body", body)?;
        let topic = required("topic", topic)?;

        let keywords = self.extractor.extract(body);
        let (text, rows) = self.storage.save_text_with_keywords(body, topic, &keywords)?;

        info!(
            text_id = text.text_id,
            topic = %topic,
            keywords = rows.len(),
            "Ingested text"
        );
        Ok(text.text_id)
    }

    pub async fn get_text(&self, text_id: TextId) -> Result<Text, ServiceError> {
        Ok(self.storage.get_text(text_id)?)
    }

    /// Delete a text and its keywords. Returns the number of keywords removed.
    pub async fn delete_text(&self, text_id: TextId) -> Result<usize, ServiceError> {
        let removed = self.storage.delete_text(text_id)?;
        // Cached documents may include the deleted body.
        self.cache.clear();
        info!(text_id, keywords = removed, "Deleted text");
        Ok(removed)
    }

    // ==================== Keywords ====================

    /// Keywords of a topic ranked by summed rank, optionally truncated.
    pub async fn get_topic_keywords(
        &self,
        topic: &str,
        limit: Option<usize>,
    ) -> Result<Vec<RankedKeyword>, ServiceError> {
        let topic = required("topic", topic)?;
        let mut ranked = self.aggregator.aggregate(topic)?;
        if let Some(limit) = limit {
            ranked.truncate(limit);
        }
        Ok(ranked)
    }

    // ==================== Sessions ====================

    /// Start a game for `topic` from a JSON keyword array. Returns the session id.
    pub async fn start_session(
        &self,
        topic: &str,
        keywords: &str,
    ) -> Result<SessionId, ServiceError> {
        let topic = required("topic", topic)?;
        let keywords = parse_keyword_set(keywords)?;
        let session = self.sessions.build(topic, &keywords)?;
        Ok(session.session_id)
    }

    pub async fn get_session(&self, session_id: SessionId) -> Result<Session, ServiceError> {
        Ok(self.storage.get_session(session_id)?)
    }

    /// Aggregated document of a session.
    pub async fn session_document(
        &self,
        session_id: SessionId,
    ) -> Result<Arc<str>, ServiceError> {
        if let Some(document) = self.cache.get(session_id) {
            debug!(session_id, "Session document cache hit");
            return Ok(document);
        }

        // Read before loading texts so a concurrent delete voids the insert.
        let generation = self.cache.generation();
        let session = self.storage.get_session(session_id)?;
        let document: Arc<str> = self.assembler.assemble(&session)?.into();
        if !self.cache.insert(session_id, document.clone(), generation) {
            debug!(session_id, "Session document not cached");
        }
        Ok(document)
    }

    // ==================== Retrieval ====================

    /// Best sentences of a session for a JSON keyword array.
    pub async fn top_sentences(
        &self,
        session_id: SessionId,
        keywords: &str,
    ) -> Result<Vec<String>, ServiceError> {
        let keywords = parse_keyword_set(keywords)?;
        let document = self.session_document(session_id).await?;
        Ok(self
            .engine
            .top_sentences(&document, &keywords, self.top_n)
            .into_iter()
            .map(String::from)
            .collect())
    }

    /// Best paragraphs of a session for a JSON keyword array.
    pub async fn top_paragraphs(
        &self,
        session_id: SessionId,
        keywords: &str,
    ) -> Result<Vec<String>, ServiceError> {
        let keywords = parse_keyword_set(keywords)?;
        let document = self.session_document(session_id).await?;
        Ok(self
            .engine
            .top_paragraphs(&document, &keywords, self.top_n)
            .into_iter()
            .map(String::from)
            .collect())
    }

    /// Sentences of a session matching a regular expression.
    pub async fn find_matching(
        &self,
        session_id: SessionId,
        pattern: &str,
    ) -> Result<Vec<String>, ServiceError> {
        let document = self.session_document(session_id).await?;
        let matches = self.engine.find_matching(&document, pattern)?;
        Ok(matches.into_iter().map(String::from).collect())
    }

    /// Whether `candidate` is exactly one of the session's sentences.
    pub async fn is_exact_sentence(
        &self,
        session_id: SessionId,
        candidate: &str,
    ) -> Result<bool, ServiceError> {
        let document = self.session_document(session_id).await?;
        Ok(self.engine.is_exact_sentence(&document, candidate))
    }

    // ==================== Sites ====================

    pub async fn add_site(&self, topic: &str, url: &str) -> Result<Site, ServiceError> {
        let topic = required("topic", topic)?;
        let url = required("url", url)?;
        let site = self.storage.save_site(topic, url)?;
        info!(site_id = site.site_id, topic = %topic, "Registered site");
        Ok(site)
    }

    pub async fn list_sites(&self, topic: &str) -> Result<Vec<Site>, ServiceError> {
        let topic = required("topic", topic)?;
        Ok(self.storage.list_sites(topic)?)
    }

    // ==================== Admin ====================

    pub async fn stats(&self) -> Result<StorageStats, ServiceError> {
        Ok(self.storage.get_stats()?)
    }

    pub async fn compact(&self) -> Result<(), ServiceError> {
        Ok(self.storage.compact()?)
    }
}
