//! RocksDB wrapper for trivia-engine storage.
//!
//! Provides:
//! - Database open/close with column family setup
//! - Append-only id allocation per record kind
//! - Text, keyword, session and site reads and writes
//! - Topic-scoped keyword scans

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rocksdb::{ColumnFamily, Direction, IteratorMode, Options, WriteBatch, DB};
use serde::Serialize;
use tracing::{debug, info, instrument};

use trivia_types::{Keyword, Rank, Session, SessionId, Site, Text, TextId};

use crate::column_families::{
    build_cf_descriptors, ALL_CF_NAMES, CF_KEYWORDS, CF_SEQUENCES, CF_SESSIONS, CF_SITES,
    CF_TEXTS,
};
use crate::error::StorageError;
use crate::keys::{validate_field, IdKind, KeywordKey, OwnerKey, SessionKey, SiteKey, TextKey};

/// Next id to hand out for each record kind. Ids start at 1.
#[derive(Debug)]
struct Sequences {
    text: u64,
    keyword: u64,
    session: u64,
    site: u64,
}

impl Sequences {
    fn slot(&mut self, kind: IdKind) -> &mut u64 {
        match kind {
            IdKind::Text => &mut self.text,
            IdKind::Keyword => &mut self.keyword,
            IdKind::Session => &mut self.session,
            IdKind::Site => &mut self.site,
        }
    }

    fn allocate(&mut self, kind: IdKind) -> u64 {
        let slot = self.slot(kind);
        let id = *slot;
        *slot += 1;
        id
    }

    fn peek(&mut self, kind: IdKind) -> u64 {
        *self.slot(kind)
    }
}

/// Main storage interface for the trivia engine
pub struct Storage {
    db: DB,
    /// Held for the whole allocate-and-write step so the persisted
    /// sequence value never goes backwards.
    sequences: Mutex<Sequences>,
}

impl Storage {
    /// Open storage at the given path, creating if necessary
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        info!("Opening storage at {:?}", path);

        let mut db_opts = Options::default();
        db_opts.create_if_missing(true);
        db_opts.create_missing_column_families(true);
        db_opts.set_max_background_jobs(4);

        let cf_descriptors = build_cf_descriptors();
        let db = DB::open_cf_descriptors(&db_opts, path, cf_descriptors)?;

        let sequences = Self::load_sequences(&db)?;
        debug!(?sequences, "Loaded id sequences");

        Ok(Self {
            db,
            sequences: Mutex::new(sequences),
        })
    }

    /// Load the next-id counters persisted alongside the records.
    fn load_sequences(db: &DB) -> Result<Sequences, StorageError> {
        let cf = db
            .cf_handle(CF_SEQUENCES)
            .ok_or_else(|| StorageError::ColumnFamilyNotFound(CF_SEQUENCES.to_string()))?;

        let mut sequences = Sequences {
            text: 1,
            keyword: 1,
            session: 1,
            site: 1,
        };
        for kind in IdKind::all() {
            if let Some(bytes) = db.get_cf(&cf, kind.sequence_key())? {
                let raw: [u8; 8] = bytes.as_slice().try_into().map_err(|_| {
                    StorageError::Serialization(format!("Corrupt sequence for {}", kind.code()))
                })?;
                *sequences.slot(*kind) = u64::from_be_bytes(raw);
            }
        }
        Ok(sequences)
    }

    fn cf(&self, name: &str) -> Result<&ColumnFamily, StorageError> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StorageError::ColumnFamilyNotFound(name.to_string()))
    }

    fn lock_sequences(&self) -> MutexGuard<'_, Sequences> {
        // Counters only ever move forward, so a poisoned guard is still usable.
        self.sequences
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn put_sequence(
        &self,
        batch: &mut WriteBatch,
        sequences: &mut Sequences,
        kind: IdKind,
    ) -> Result<(), StorageError> {
        let cf = self.cf(CF_SEQUENCES)?;
        batch.put_cf(&cf, kind.sequence_key(), sequences.peek(kind).to_be_bytes());
        Ok(())
    }

    // ==================== Text Methods ====================

    /// Store a new text under a topic.
    pub fn save_text(&self, body: &str, topic: &str) -> Result<Text, StorageError> {
        let (text, _) = self.save_text_with_keywords(body, topic, &[])?;
        Ok(text)
    }

    /// Get a text by id.
    pub fn get_text(&self, text_id: TextId) -> Result<Text, StorageError> {
        let texts_cf = self.cf(CF_TEXTS)?;
        match self.db.get_cf(&texts_cf, TextKey::new(text_id).to_bytes())? {
            Some(bytes) => Ok(Text::from_bytes(&bytes)?),
            None => Err(StorageError::NotFound(format!("text {}", text_id))),
        }
    }

    /// Delete a text together with every keyword row it owns.
    ///
    /// Returns the number of keyword rows removed.
    #[instrument(skip(self))]
    pub fn delete_text(&self, text_id: TextId) -> Result<usize, StorageError> {
        // Fails with NotFound for unknown ids
        self.get_text(text_id)?;

        let texts_cf = self.cf(CF_TEXTS)?;
        let keywords_cf = self.cf(CF_KEYWORDS)?;

        let mut batch = WriteBatch::default();
        let mut removed = 0;
        for (owner_key, keyword_key) in self.scan_prefix(CF_KEYWORDS, &OwnerKey::prefix(text_id))? {
            batch.delete_cf(&keywords_cf, &keyword_key);
            batch.delete_cf(&keywords_cf, &owner_key);
            removed += 1;
        }
        batch.delete_cf(&texts_cf, TextKey::new(text_id).to_bytes());
        self.db.write(batch)?;

        debug!(text_id, keywords = removed, "Deleted text");
        Ok(removed)
    }

    /// Store a new text together with its extracted keywords.
    ///
    /// Everything is checked before any id is allocated, and the text
    /// record, keyword rows, owner index and both sequences land in one
    /// `WriteBatch`. A rejected keyword leaves nothing behind.
    #[instrument(skip(self, body, keywords), fields(count = keywords.len()))]
    pub fn save_text_with_keywords(
        &self,
        body: &str,
        topic: &str,
        keywords: &[(String, Rank)],
    ) -> Result<(Text, Vec<Keyword>), StorageError> {
        validate_field("topic", topic)?;
        validate_keywords(keywords)?;
        let texts_cf = self.cf(CF_TEXTS)?;
        let keywords_cf = self.cf(CF_KEYWORDS)?;

        let mut sequences = self.lock_sequences();
        let text = Text::new(sequences.allocate(IdKind::Text), body, topic);

        let mut batch = WriteBatch::default();
        batch.put_cf(
            &texts_cf,
            TextKey::new(text.text_id).to_bytes(),
            text.to_bytes()?,
        );
        let rows =
            Self::put_keyword_rows(&mut batch, keywords_cf, &mut sequences, &text, keywords)?;
        self.put_sequence(&mut batch, &mut sequences, IdKind::Text)?;
        if !rows.is_empty() {
            self.put_sequence(&mut batch, &mut sequences, IdKind::Keyword)?;
        }
        self.db.write(batch)?;
        drop(sequences);

        debug!(
            text_id = text.text_id,
            keywords = rows.len(),
            "Stored text with keywords"
        );
        Ok((text, rows))
    }

    // ==================== Keyword Methods ====================

    /// Attach extracted keywords to a stored text.
    ///
    /// `topic` must be the text's own topic; every row copies it from the
    /// text record, which is the only place a keyword's topic is set.
    #[instrument(skip(self, keywords), fields(count = keywords.len()))]
    pub fn save_keywords(
        &self,
        text_id: TextId,
        topic: &str,
        keywords: &[(String, Rank)],
    ) -> Result<Vec<Keyword>, StorageError> {
        let text = self.get_text(text_id)?;
        if text.topic != topic {
            return Err(StorageError::InvalidInput(format!(
                "topic '{}' does not match topic '{}' of text {}",
                topic, text.topic, text_id
            )));
        }
        validate_keywords(keywords)?;
        if keywords.is_empty() {
            return Ok(Vec::new());
        }

        let keywords_cf = self.cf(CF_KEYWORDS)?;
        let mut sequences = self.lock_sequences();
        let mut batch = WriteBatch::default();
        let rows =
            Self::put_keyword_rows(&mut batch, keywords_cf, &mut sequences, &text, keywords)?;
        self.put_sequence(&mut batch, &mut sequences, IdKind::Keyword)?;
        self.db.write(batch)?;
        drop(sequences);

        debug!(text_id, keywords = rows.len(), "Stored keywords");
        Ok(rows)
    }

    /// Queue one keyword row and its owner index entry per keyword.
    fn put_keyword_rows(
        batch: &mut WriteBatch,
        keywords_cf: &ColumnFamily,
        sequences: &mut Sequences,
        text: &Text,
        keywords: &[(String, Rank)],
    ) -> Result<Vec<Keyword>, StorageError> {
        let mut rows = Vec::with_capacity(keywords.len());
        for (keyword, rank) in keywords {
            let keyword_id = sequences.allocate(IdKind::Keyword);
            let row = Keyword::for_text(keyword_id, text, keyword, *rank);
            let key = KeywordKey::new(&row.topic, &row.keyword, row.keyword_id).to_bytes();
            batch.put_cf(keywords_cf, &key, row.to_bytes()?);
            batch.put_cf(
                keywords_cf,
                OwnerKey::new(text.text_id, row.keyword_id).to_bytes(),
                &key,
            );
            rows.push(row);
        }
        Ok(rows)
    }

    /// Get every keyword row of a topic.
    ///
    /// Rows come back grouped by keyword string, in key order.
    pub fn find_keywords(&self, topic: &str) -> Result<Vec<Keyword>, StorageError> {
        self.scan_prefix(CF_KEYWORDS, &KeywordKey::topic_prefix(topic))?
            .into_iter()
            .map(|(_, value)| Keyword::from_bytes(&value).map_err(StorageError::from))
            .collect()
    }

    /// Get every row of one keyword within a topic.
    pub fn find_keyword_rows(
        &self,
        topic: &str,
        keyword: &str,
    ) -> Result<Vec<Keyword>, StorageError> {
        self.scan_prefix(CF_KEYWORDS, &KeywordKey::keyword_prefix(topic, keyword))?
            .into_iter()
            .map(|(_, value)| Keyword::from_bytes(&value).map_err(StorageError::from))
            .collect()
    }

    /// Get the text in which `keyword` is most relevant for `topic`.
    ///
    /// Higher rank means more relevant, so the row with the highest rank
    /// wins. Equal ranks go to the lowest text id.
    #[instrument(skip(self))]
    pub fn best_text_for(&self, topic: &str, keyword: &str) -> Result<Text, StorageError> {
        let best = self
            .find_keyword_rows(topic, keyword)?
            .into_iter()
            .max_by(|a, b| a.rank.cmp(&b.rank).then(b.text_id.cmp(&a.text_id)))
            .ok_or_else(|| {
                StorageError::NotFound(format!("keyword '{}' in topic '{}'", keyword, topic))
            })?;

        debug!(text_id = best.text_id, rank = best.rank, "Best text for keyword");
        self.get_text(best.text_id)
    }

    // ==================== Session Methods ====================

    /// Store a new session over the given texts.
    #[instrument(skip(self, text_ids), fields(texts = text_ids.len()))]
    pub fn save_session(&self, text_ids: &BTreeSet<TextId>) -> Result<Session, StorageError> {
        let sessions_cf = self.cf(CF_SESSIONS)?;

        let mut sequences = self.lock_sequences();
        let session = Session::new(sequences.allocate(IdKind::Session), text_ids.iter().copied());

        let mut batch = WriteBatch::default();
        batch.put_cf(
            &sessions_cf,
            SessionKey::new(session.session_id).to_bytes(),
            session.to_bytes()?,
        );
        self.put_sequence(&mut batch, &mut sequences, IdKind::Session)?;
        self.db.write(batch)?;
        drop(sequences);

        debug!(session_id = session.session_id, "Stored session");
        Ok(session)
    }

    /// Get a session by id.
    pub fn get_session(&self, session_id: SessionId) -> Result<Session, StorageError> {
        let sessions_cf = self.cf(CF_SESSIONS)?;
        match self.db.get_cf(&sessions_cf, SessionKey::new(session_id).to_bytes())? {
            Some(bytes) => Ok(Session::from_bytes(&bytes)?),
            None => Err(StorageError::NotFound(format!("session {}", session_id))),
        }
    }

    // ==================== Site Methods ====================

    /// Register a site for a topic.
    #[instrument(skip(self))]
    pub fn save_site(&self, topic: &str, url: &str) -> Result<Site, StorageError> {
        validate_field("topic", topic)?;
        let sites_cf = self.cf(CF_SITES)?;

        let mut sequences = self.lock_sequences();
        let site = Site::new(sequences.allocate(IdKind::Site), topic, url);

        let mut batch = WriteBatch::default();
        batch.put_cf(
            &sites_cf,
            SiteKey::new(topic, site.site_id).to_bytes(),
            site.to_bytes()?,
        );
        self.put_sequence(&mut batch, &mut sequences, IdKind::Site)?;
        self.db.write(batch)?;
        drop(sequences);

        debug!(site_id = site.site_id, "Stored site");
        Ok(site)
    }

    /// Get the sites registered for a topic, oldest first.
    pub fn list_sites(&self, topic: &str) -> Result<Vec<Site>, StorageError> {
        self.scan_prefix(CF_SITES, &SiteKey::topic_prefix(topic))?
            .into_iter()
            .map(|(_, value)| Site::from_bytes(&value).map_err(StorageError::from))
            .collect()
    }

    // ==================== Scans ====================

    /// Collect entries whose key starts with `prefix`.
    fn scan_prefix(
        &self,
        cf_name: &str,
        prefix: &[u8],
    ) -> Result<Vec<(Vec<u8>, Vec<u8>)>, StorageError> {
        let cf = self.cf(cf_name)?;

        let mut results = Vec::new();
        let iter = self
            .db
            .iterator_cf(&cf, IteratorMode::From(prefix, Direction::Forward));

        for item in iter {
            let (key, value) = item?;
            if !key.starts_with(prefix) {
                break;
            }
            results.push((key.to_vec(), value.to_vec()));
        }

        Ok(results)
    }

    fn count_prefix(&self, cf_name: &str, prefix: &[u8]) -> Result<u64, StorageError> {
        let cf = self.cf(cf_name)?;
        let mut count = 0u64;
        let iter = self
            .db
            .iterator_cf(&cf, IteratorMode::From(prefix, Direction::Forward));
        for item in iter {
            let (key, _) = item?;
            if !key.starts_with(prefix) {
                break;
            }
            count += 1;
        }
        Ok(count)
    }

    // ===== Admin Operations =====

    /// Trigger manual compaction on all column families.
    pub fn compact(&self) -> Result<(), StorageError> {
        info!("Starting full compaction...");
        for cf_name in ALL_CF_NAMES {
            if let Some(cf) = self.db.cf_handle(cf_name) {
                self.db.compact_range_cf::<&[u8], &[u8]>(&cf, None, None);
            }
        }
        info!("Compaction complete");
        Ok(())
    }

    /// Get database statistics.
    pub fn get_stats(&self) -> Result<StorageStats, StorageError> {
        Ok(StorageStats {
            text_count: self.count_prefix(CF_TEXTS, b"text:")?,
            keyword_count: self.count_prefix(CF_KEYWORDS, b"kw:")?,
            session_count: self.count_prefix(CF_SESSIONS, b"session:")?,
            site_count: self.count_prefix(CF_SITES, b"site:")?,
            disk_usage_bytes: self.get_disk_usage(),
        })
    }

    fn get_disk_usage(&self) -> u64 {
        let mut total_size = 0u64;
        if let Ok(entries) = std::fs::read_dir(self.db.path()) {
            for entry in entries.flatten() {
                if let Ok(metadata) = entry.metadata() {
                    total_size += metadata.len();
                }
            }
        }
        total_size
    }
}

/// Reject keywords that could not be stored or would never rank.
fn validate_keywords(keywords: &[(String, Rank)]) -> Result<(), StorageError> {
    for (keyword, rank) in keywords {
        if keyword.is_empty() {
            return Err(StorageError::InvalidInput("empty keyword".to_string()));
        }
        if *rank == 0 {
            return Err(StorageError::InvalidInput(format!(
                "keyword '{}' has rank 0",
                keyword
            )));
        }
        validate_field("keyword", keyword)?;
    }
    Ok(())
}

/// Statistics about the storage.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct StorageStats {
    pub text_count: u64,
    pub keyword_count: u64,
    pub session_count: u64,
    pub site_count: u64,
    /// Total disk usage in bytes
    pub disk_usage_bytes: u64,
}
