//! Source sites registered per topic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a registered site.
pub type SiteId = u64;

/// A web site texts for a topic may be gathered from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    pub site_id: SiteId,
    pub topic: String,
    pub url: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
}

impl Site {
    pub fn new(site_id: SiteId, topic: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            site_id,
            topic: topic.into(),
            url: url.into(),
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
