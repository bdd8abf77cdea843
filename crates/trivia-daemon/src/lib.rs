//! Trivia daemon library exports.
//!
//! This crate provides the `trivia` command-line binary.
//!
//! # Modules
//!
//! - `cli`: Command-line argument parsing with clap
//! - `commands`: Command implementations over a local database

pub mod cli;
pub mod commands;

pub use cli::{AdminCommands, Cli, Commands, TextCommands};
pub use commands::{
    execute, exit_code, init_logging, load_settings, open_service, run, EXIT_BAD_INPUT,
    EXIT_NOT_FOUND,
};
