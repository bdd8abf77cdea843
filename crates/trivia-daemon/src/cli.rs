//! CLI argument parsing for the trivia binary.
//!
//! CLI flags override all other config sources.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Trivia engine
///
/// Stores topic-tagged texts, ranks their keywords and plays word games
/// over them. Every command prints a JSON object on stdout.
#[derive(Parser, Debug)]
#[command(name = "trivia")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config file (overrides default ~/.config/trivia-engine/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// Override database path
    #[arg(long, global = true)]
    pub db_path: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Trivia commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Store a text under a topic and extract its keywords
    Ingest {
        /// Topic of the text
        topic: String,

        /// Text body
        #[arg(short, long, conflicts_with = "file")]
        text: Option<String>,

        /// Read the text body from a file
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Show the ranked keywords of a topic
    Keywords {
        topic: String,

        /// Maximum number of keywords
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Start a game from a topic and a JSON keyword array
    NewGame {
        topic: String,

        /// Keywords as a JSON array, e.g. '["fox","owl"]'
        keywords: String,
    },

    /// Best sentences of a game for a JSON keyword array
    Sentences { game_id: String, keywords: String },

    /// Best paragraphs of a game for a JSON keyword array
    Paragraphs { game_id: String, keywords: String },

    /// Sentences of a game matching a regular expression
    Complete { game_id: String, pattern: String },

    /// Check whether a sentence occurs exactly in a game
    Check { game_id: String, sentence: String },

    /// Text lookup and deletion
    Text {
        #[command(subcommand)]
        command: TextCommands,
    },

    /// Register a site for a topic
    AddSite { topic: String, url: String },

    /// List the sites registered for a topic
    Sites { topic: String },

    /// Administrative commands
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },
}

/// Text subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum TextCommands {
    /// Show a stored text
    Get { text_id: u64 },

    /// Delete a text and its keywords
    Delete { text_id: u64 },
}

/// Admin subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum AdminCommands {
    /// Show database statistics
    Stats,

    /// Trigger RocksDB compaction
    Compact,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_ingest_text() {
        let cli = Cli::parse_from(["trivia", "ingest", "animals", "--text", "A fox jumped."]);
        match cli.command {
            Commands::Ingest { topic, text, file } => {
                assert_eq!(topic, "animals");
                assert_eq!(text.as_deref(), Some("A fox jumped."));
                assert!(file.is_none());
            }
            _ => panic!("Expected Ingest command"),
        }
    }

    #[test]
    fn test_cli_ingest_text_and_file_conflict() {
        let result = Cli::try_parse_from([
            "trivia", "ingest", "animals", "--text", "x", "--file", "x.txt",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_keywords_limit() {
        let cli = Cli::parse_from(["trivia", "keywords", "animals", "-n", "5"]);
        match cli.command {
            Commands::Keywords { topic, limit } => {
                assert_eq!(topic, "animals");
                assert_eq!(limit, Some(5));
            }
            _ => panic!("Expected Keywords command"),
        }
    }

    #[test]
    fn test_cli_new_game() {
        let cli = Cli::parse_from(["trivia", "new-game", "animals", r#"["fox","owl"]"#]);
        match cli.command {
            Commands::NewGame { topic, keywords } => {
                assert_eq!(topic, "animals");
                assert_eq!(keywords, r#"["fox","owl"]"#);
            }
            _ => panic!("Expected NewGame command"),
        }
    }

    #[test]
    fn test_cli_complete() {
        let cli = Cli::parse_from(["trivia", "complete", "3", "f.x"]);
        match cli.command {
            Commands::Complete { game_id, pattern } => {
                assert_eq!(game_id, "3");
                assert_eq!(pattern, "f.x");
            }
            _ => panic!("Expected Complete command"),
        }
    }

    #[test]
    fn test_cli_text_delete() {
        let cli = Cli::parse_from(["trivia", "text", "delete", "12"]);
        match cli.command {
            Commands::Text {
                command: TextCommands::Delete { text_id },
            } => assert_eq!(text_id, 12),
            _ => panic!("Expected Text Delete command"),
        }
    }

    #[test]
    fn test_cli_admin_stats() {
        let cli = Cli::parse_from(["trivia", "admin", "stats"]);
        assert!(matches!(
            cli.command,
            Commands::Admin {
                command: AdminCommands::Stats
            }
        ));
    }

    #[test]
    fn test_cli_global_flags() {
        let cli = Cli::parse_from([
            "trivia",
            "sites",
            "animals",
            "--config",
            "/path/to/config.toml",
            "--log-level",
            "debug",
            "--db-path",
            "/custom/db",
        ]);
        assert_eq!(cli.config.as_deref(), Some("/path/to/config.toml"));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert_eq!(cli.db_path.as_deref(), Some("/custom/db"));
    }
}
