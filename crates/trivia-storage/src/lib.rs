//! Storage layer for the trivia engine.
//!
//! Provides RocksDB-backed storage with:
//! - Column family isolation per record kind
//! - Topic-prefixed keyword keys for per-topic scans
//! - Atomic writes via WriteBatch (record + id sequence together)
//! - Integer ids that are never reused
//! - Cascading keyword deletion when a text is removed

pub mod column_families;
pub mod db;
pub mod error;
pub mod keys;

pub use db::{Storage, StorageStats};
pub use error::StorageError;
pub use keys::{IdKind, KeywordKey, SessionKey, SiteKey, TextKey};
