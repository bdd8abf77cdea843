//! Column family definitions for RocksDB.
//!
//! - texts: Source texts keyed by id
//! - keywords: Keyword rows keyed by topic/keyword, plus the owner index
//! - sessions: Game sessions keyed by id
//! - sites: Registered sites keyed by topic
//! - sequences: Next-id counters per record kind

use rocksdb::{ColumnFamilyDescriptor, Options};

/// Column family name for source texts
pub const CF_TEXTS: &str = "texts";

/// Column family name for keyword rows and the text -> keyword index
pub const CF_KEYWORDS: &str = "keywords";

/// Column family name for game sessions
pub const CF_SESSIONS: &str = "sessions";

/// Column family name for registered sites
pub const CF_SITES: &str = "sites";

/// Column family name for id sequences
pub const CF_SEQUENCES: &str = "sequences";

/// All column family names
pub const ALL_CF_NAMES: &[&str] = &[CF_TEXTS, CF_KEYWORDS, CF_SESSIONS, CF_SITES, CF_SEQUENCES];

/// Texts are written once and read often; compress them.
fn texts_options() -> Options {
    let mut opts = Options::default();
    opts.set_compression_type(rocksdb::DBCompressionType::Zstd);
    opts
}

/// Build all column family descriptors
pub fn build_cf_descriptors() -> Vec<ColumnFamilyDescriptor> {
    vec![
        ColumnFamilyDescriptor::new(CF_TEXTS, texts_options()),
        ColumnFamilyDescriptor::new(CF_KEYWORDS, Options::default()),
        ColumnFamilyDescriptor::new(CF_SESSIONS, Options::default()),
        ColumnFamilyDescriptor::new(CF_SITES, Options::default()),
        ColumnFamilyDescriptor::new(CF_SEQUENCES, Options::default()),
    ]
}
