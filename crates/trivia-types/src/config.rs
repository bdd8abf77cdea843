//! Configuration loading for trivia-engine.
//!
//! Layered config: defaults -> config file -> env vars -> CLI flags.
//! The default config file lives at ~/.config/trivia-engine/config.toml.

use config::{Config, Environment, File};
use directories::{BaseDirs, ProjectDirs};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::TriviaError;

/// Keyword extraction settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionSettings {
    /// Maximum number of keywords kept per text
    #[serde(default = "default_max_keywords")]
    pub max_keywords: usize,

    /// Tokens shorter than this (in chars) are never keywords
    #[serde(default = "default_min_token_length")]
    pub min_token_length: usize,
}

fn default_max_keywords() -> usize {
    20
}

fn default_min_token_length() -> usize {
    2
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            max_keywords: default_max_keywords(),
            min_token_length: default_min_token_length(),
        }
    }
}

/// Sentences or paragraphs returned by a top-N lookup unless configured.
pub const DEFAULT_TOP_N: usize = 2;

/// Retrieval settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalSettings {
    /// Number of sentences/paragraphs returned by top-N lookups
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Number of session documents kept in memory (0 disables the cache)
    #[serde(default = "default_document_cache_size")]
    pub document_cache_size: usize,
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

fn default_document_cache_size() -> usize {
    64
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            document_cache_size: default_document_cache_size(),
        }
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Path to RocksDB storage directory
    #[serde(default = "default_db_path")]
    pub db_path: String,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub extraction: ExtractionSettings,

    #[serde(default)]
    pub retrieval: RetrievalSettings,
}

fn default_db_path() -> String {
    ProjectDirs::from("", "", "trivia-engine")
        .map(|p| p.data_local_dir().join("db"))
        .unwrap_or_else(|| PathBuf::from("./data"))
        .to_string_lossy()
        .to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            log_level: default_log_level(),
            extraction: ExtractionSettings::default(),
            retrieval: RetrievalSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings with layered precedence:
    /// 1. Built-in defaults
    /// 2. Config file (~/.config/trivia-engine/config.toml)
    /// 3. CLI-specified config file (optional)
    /// 4. Environment variables (TRIVIA_*, nested keys joined with `__`)
    ///
    /// CLI flags should be applied by the caller after this returns.
    pub fn load(cli_config_path: Option<&str>) -> Result<Self, TriviaError> {
        let config_dir = ProjectDirs::from("", "", "trivia-engine")
            .map(|p| p.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        let default_config_path = config_dir.join("config");

        let mut builder = Config::builder()
            .set_default("db_path", default_db_path())
            .map_err(|e| TriviaError::Config(e.to_string()))?
            .set_default("log_level", default_log_level())
            .map_err(|e| TriviaError::Config(e.to_string()))?
            .set_default("extraction.max_keywords", default_max_keywords() as i64)
            .map_err(|e| TriviaError::Config(e.to_string()))?
            .set_default(
                "extraction.min_token_length",
                default_min_token_length() as i64,
            )
            .map_err(|e| TriviaError::Config(e.to_string()))?
            .set_default("retrieval.top_n", default_top_n() as i64)
            .map_err(|e| TriviaError::Config(e.to_string()))?
            .set_default(
                "retrieval.document_cache_size",
                default_document_cache_size() as i64,
            )
            .map_err(|e| TriviaError::Config(e.to_string()))?
            .add_source(File::with_name(&default_config_path.to_string_lossy()).required(false));

        if let Some(path) = cli_config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // TRIVIA_DB_PATH, TRIVIA_RETRIEVAL__TOP_N, ...
        builder = builder.add_source(
            Environment::with_prefix("TRIVIA")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| TriviaError::Config(e.to_string()))?;

        let settings: Settings = config
            .try_deserialize()
            .map_err(|e| TriviaError::Config(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> Result<(), TriviaError> {
        if self.retrieval.top_n == 0 {
            return Err(TriviaError::Config("retrieval.top_n must be > 0".to_string()));
        }
        if self.extraction.max_keywords == 0 {
            return Err(TriviaError::Config(
                "extraction.max_keywords must be > 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Expand ~ in db_path to actual home directory
    pub fn expanded_db_path(&self) -> PathBuf {
        if let Some(rest) = self.db_path.strip_prefix("~/") {
            if let Some(dirs) = BaseDirs::new() {
                return dirs.home_dir().join(rest);
            }
        }
        PathBuf::from(&self.db_path)
    }
}
