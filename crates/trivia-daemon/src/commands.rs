//! Command implementations.
//!
//! Each command runs one service operation against the local database and
//! yields a JSON value for stdout.

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use serde_json::{json, Value};
use tracing::{debug, info};

use trivia_service::{parse_session_id, GameService, ServiceError};
use trivia_storage::Storage;
use trivia_types::Settings;

use crate::cli::{AdminCommands, Cli, Commands, TextCommands};

/// Exit code for bad-input failures.
pub const EXIT_BAD_INPUT: u8 = 2;

/// Exit code for not-found failures.
pub const EXIT_NOT_FOUND: u8 = 3;

/// Load configuration and apply CLI overrides (highest precedence).
pub fn load_settings(
    config_path: Option<&str>,
    db_path_override: Option<&str>,
    log_level_override: Option<&str>,
) -> Result<Settings> {
    let mut settings = Settings::load(config_path).context("Failed to load configuration")?;

    if let Some(db_path) = db_path_override {
        settings.db_path = db_path.to_string();
    }
    if let Some(log_level) = log_level_override {
        settings.log_level = log_level.to_string();
    }
    Ok(settings)
}

/// Install the global tracing subscriber. Logs go to stderr.
pub fn init_logging(settings: &Settings) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&settings.log_level)),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;
    Ok(())
}

/// Open storage at the configured path and build the service over it.
pub fn open_service(settings: &Settings) -> Result<GameService> {
    let db_path = settings.expanded_db_path();
    std::fs::create_dir_all(&db_path)
        .with_context(|| format!("Failed to create database directory {:?}", db_path))?;

    let storage = Storage::open(&db_path)
        .with_context(|| format!("Failed to open storage at {:?}", db_path))?;
    debug!(path = ?db_path, "Opened storage");
    Ok(GameService::new(Arc::new(storage), settings))
}

/// Run a parsed command line.
pub async fn run(cli: Cli) -> Result<Value> {
    let settings = load_settings(
        cli.config.as_deref(),
        cli.db_path.as_deref(),
        cli.log_level.as_deref(),
    )?;
    init_logging(&settings)?;

    info!(db_path = %settings.db_path, "Trivia engine starting");
    let service = open_service(&settings)?;
    execute(&service, cli.command).await
}

/// Execute one command against `service`.
pub async fn execute(service: &GameService, command: Commands) -> Result<Value> {
    let output = match command {
        Commands::Ingest { topic, text, file } => {
            let body = match (text, file) {
                (Some(text), _) => text,
                (None, Some(path)) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {:?}", path))?,
                (None, None) => bail!(ServiceError::BadInput(
                    "either --text or --file is required".to_string()
                )),
            };
            let text_id = service.ingest_text(&body, &topic).await?;
            json!({ "text_id": text_id })
        }
        Commands::Keywords { topic, limit } => {
            let keywords: Vec<Value> = service
                .get_topic_keywords(&topic, limit)
                .await?
                .into_iter()
                .map(|ranked| json!([ranked.keyword, ranked.total_rank]))
                .collect();
            json!({ "keywords": keywords })
        }
        Commands::NewGame { topic, keywords } => {
            let game_id = service.start_session(&topic, &keywords).await?;
            json!({ "game_id": game_id })
        }
        Commands::Sentences { game_id, keywords } => {
            let sentences = service
                .top_sentences(parse_session_id(&game_id)?, &keywords)
                .await?;
            json!({ "sentences": sentences })
        }
        Commands::Paragraphs { game_id, keywords } => {
            let paragraphs = service
                .top_paragraphs(parse_session_id(&game_id)?, &keywords)
                .await?;
            json!({ "paragraphs": paragraphs })
        }
        Commands::Complete { game_id, pattern } => {
            let sentences = service
                .find_matching(parse_session_id(&game_id)?, &pattern)
                .await?;
            json!({ "sentences": sentences })
        }
        Commands::Check { game_id, sentence } => {
            let correct = service
                .is_exact_sentence(parse_session_id(&game_id)?, &sentence)
                .await?;
            json!({ "is_sentence_correct": correct })
        }
        Commands::Text { command } => match command {
            TextCommands::Get { text_id } => {
                serde_json::to_value(service.get_text(text_id).await?)?
            }
            TextCommands::Delete { text_id } => {
                let removed = service.delete_text(text_id).await?;
                json!({ "text_id": text_id, "keywords_removed": removed })
            }
        },
        Commands::AddSite { topic, url } => {
            serde_json::to_value(service.add_site(&topic, &url).await?)?
        }
        Commands::Sites { topic } => {
            let sites = service.list_sites(&topic).await?;
            json!({ "sites": sites })
        }
        Commands::Admin { command } => match command {
            AdminCommands::Stats => serde_json::to_value(service.stats().await?)?,
            AdminCommands::Compact => {
                service.compact().await?;
                json!({ "compacted": true })
            }
        },
    };
    Ok(output)
}

/// Process exit code for a failed command.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<ServiceError>() {
        Some(ServiceError::BadInput(_)) => EXIT_BAD_INPUT,
        Some(ServiceError::NotFound(_)) => EXIT_NOT_FOUND,
        _ => 1,
    }
}
