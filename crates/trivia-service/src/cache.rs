//! Bounded cache of assembled session documents.
//!
//! A session's text set never changes after creation, so a cached
//! document stays valid until one of its texts is deleted. Deleting a
//! text clears the whole cache and starts a new generation; a document
//! assembled under an older generation is never inserted.

use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard};

use lru::LruCache;
use trivia_types::SessionId;

struct CacheState {
    documents: LruCache<SessionId, Arc<str>>,
    generation: u64,
}

pub struct DocumentCache {
    /// `None` when caching is disabled
    state: Option<Mutex<CacheState>>,
}

impl DocumentCache {
    /// Cache holding up to `capacity` documents. Zero disables caching.
    pub fn new(capacity: usize) -> Self {
        Self {
            state: NonZeroUsize::new(capacity).map(|cap| {
                Mutex::new(CacheState {
                    documents: LruCache::new(cap),
                    generation: 0,
                })
            }),
        }
    }

    fn lock(state: &Mutex<CacheState>) -> MutexGuard<'_, CacheState> {
        state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Current generation. Read it before loading the texts of a document
    /// and hand it back to [`DocumentCache::insert`].
    pub fn generation(&self) -> u64 {
        self.state.as_ref().map_or(0, |state| Self::lock(state).generation)
    }

    pub fn get(&self, session_id: SessionId) -> Option<Arc<str>> {
        let state = self.state.as_ref()?;
        Self::lock(state).documents.get(&session_id).cloned()
    }

    /// Cache `document` unless the cache was cleared after `generation`
    /// was read. Returns whether the document was stored.
    pub fn insert(&self, session_id: SessionId, document: Arc<str>, generation: u64) -> bool {
        let Some(state) = &self.state else {
            return false;
        };
        let mut state = Self::lock(state);
        if state.generation != generation {
            return false;
        }
        state.documents.put(session_id, document);
        true
    }

    pub fn clear(&self) {
        if let Some(state) = &self.state {
            let mut state = Self::lock(state);
            state.generation += 1;
            state.documents.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.state
            .as_ref()
            .map_or(0, |state| Self::lock(state).documents.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
