//! Trivia engine command-line interface.
//!
//! # Usage
//!
//! ```bash
//! trivia ingest animals --text "The cat sat. The dog ran."
//! trivia keywords animals --limit 10
//! trivia new-game animals '["cat","dog"]'
//! trivia sentences 1 '["cat"]'
//! trivia complete 1 'c.t'
//! trivia check 1 'The cat sat.'
//! ```
//!
//! # Configuration
//!
//! Configuration is loaded in order (later sources override earlier):
//! 1. Built-in defaults
//! 2. Config file (~/.config/trivia-engine/config.toml)
//! 3. Environment variables (TRIVIA_*)
//! 4. CLI flags
//!
//! # Exit codes
//!
//! 0 on success, 2 for bad input, 3 when a record is not found and 1 for
//! any other failure. Failures print `{"error": ...}` on stderr.

use std::process::ExitCode;

use clap::Parser;
use serde_json::json;

use trivia_daemon::{exit_code, run, Cli};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", json!({ "error": format!("{:#}", err) }));
            ExitCode::from(exit_code(&err))
        }
    }
}
