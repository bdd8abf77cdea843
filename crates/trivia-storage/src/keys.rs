//! Key encoding and decoding for the storage layer.
//!
//! Numeric ids are zero-padded to 20 digits so lexicographic key order
//! matches numeric order. String fields (topic, keyword) are terminated by
//! the ASCII unit separator (0x1F) so that a prefix scan for topic `a`
//! never picks up rows of topic `ab`.
//!
//! Formats:
//! - `text:{text_id:020}`
//! - `kw:{topic}\x1F{keyword}\x1F{keyword_id:020}`
//! - `owner:{text_id:020}:{keyword_id:020}` (text -> keyword index)
//! - `session:{session_id:020}`
//! - `site:{topic}\x1F{site_id:020}`
//! - `seq:{kind}`

use crate::error::StorageError;

/// Separator between variable-length string fields in a key.
pub const FIELD_SEP: char = '\u{1f}';

/// Reject string fields that would corrupt key encoding.
pub fn validate_field(name: &str, value: &str) -> Result<(), StorageError> {
    if value.contains(FIELD_SEP) {
        return Err(StorageError::InvalidInput(format!(
            "{} must not contain control character U+001F",
            name
        )));
    }
    Ok(())
}

/// Key for text records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextKey {
    pub text_id: u64,
}

impl TextKey {
    pub fn new(text_id: u64) -> Self {
        Self { text_id }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        format!("text:{:020}", self.text_id).into_bytes()
    }
}

/// Key for keyword rows, grouped by topic then keyword.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordKey {
    pub topic: String,
    pub keyword: String,
    pub keyword_id: u64,
}

impl KeywordKey {
    pub fn new(topic: impl Into<String>, keyword: impl Into<String>, keyword_id: u64) -> Self {
        Self {
            topic: topic.into(),
            keyword: keyword.into(),
            keyword_id,
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        format!(
            "kw:{}{sep}{}{sep}{:020}",
            self.topic,
            self.keyword,
            self.keyword_id,
            sep = FIELD_SEP
        )
        .into_bytes()
    }

    /// Prefix covering every keyword row of a topic.
    pub fn topic_prefix(topic: &str) -> Vec<u8> {
        format!("kw:{}{}", topic, FIELD_SEP).into_bytes()
    }

    /// Prefix covering every row of one keyword within a topic.
    pub fn keyword_prefix(topic: &str, keyword: &str) -> Vec<u8> {
        format!("kw:{}{sep}{}{sep}", topic, keyword, sep = FIELD_SEP).into_bytes()
    }
}

/// Secondary index from a text to the keyword rows it owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnerKey {
    pub text_id: u64,
    pub keyword_id: u64,
}

impl OwnerKey {
    pub fn new(text_id: u64, keyword_id: u64) -> Self {
        Self {
            text_id,
            keyword_id,
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        format!("owner:{:020}:{:020}", self.text_id, self.keyword_id).into_bytes()
    }

    pub fn prefix(text_id: u64) -> Vec<u8> {
        format!("owner:{:020}:", text_id).into_bytes()
    }
}

/// Key for game sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionKey {
    pub session_id: u64,
}

impl SessionKey {
    pub fn new(session_id: u64) -> Self {
        Self { session_id }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        format!("session:{:020}", self.session_id).into_bytes()
    }
}

/// Key for registered sites, grouped by topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteKey {
    pub topic: String,
    pub site_id: u64,
}

impl SiteKey {
    pub fn new(topic: impl Into<String>, site_id: u64) -> Self {
        Self {
            topic: topic.into(),
            site_id,
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        format!("site:{}{}{:020}", self.topic, FIELD_SEP, self.site_id).into_bytes()
    }

    pub fn topic_prefix(topic: &str) -> Vec<u8> {
        format!("site:{}{}", topic, FIELD_SEP).into_bytes()
    }
}

/// Record kinds that get their own id sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    Text,
    Keyword,
    Session,
    Site,
}

impl IdKind {
    pub fn code(&self) -> &'static str {
        match self {
            IdKind::Text => "text",
            IdKind::Keyword => "keyword",
            IdKind::Session => "session",
            IdKind::Site => "site",
        }
    }

    pub fn all() -> &'static [IdKind] {
        &[IdKind::Text, IdKind::Keyword, IdKind::Session, IdKind::Site]
    }

    /// Key holding the next id to hand out for this kind.
    pub fn sequence_key(&self) -> Vec<u8> {
        format!("seq:{}", self.code()).into_bytes()
    }
}
