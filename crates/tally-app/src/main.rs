//! Tally application binary - composition root.
//!
//! Ties together the Tally crates into a single executable:
//! 1. Parse CLI arguments and load configuration from TOML
//! 2. Open the SQLite ledger database (running migrations)
//! 3. Train the intent classifier from the built-in corpus
//! 4. Build the chat dispatcher over the ledger repositories
//! 5. Start the axum REST API server

mod cli;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use tally_api::{routes, AppState};
use tally_chat::{ChatDispatcher, LedgerOps};
use tally_core::TallyConfig;
use tally_nlu::{IntentClassifier, UtteranceCorpus};
use tally_storage::{BillRepository, CustomerRepository, Database};

use cli::CliArgs;

/// Expand ~ to home directory in a path string.
fn resolve_data_dir(data_dir: &str) -> PathBuf {
    if data_dir.starts_with("~/") || data_dir.starts_with("~\\") {
        #[cfg(target_os = "windows")]
        let home = std::env::var("USERPROFILE").unwrap_or_else(|_| ".".to_string());
        #[cfg(not(target_os = "windows"))]
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(&data_dir[2..])
    } else {
        PathBuf::from(data_dir)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config.
    let config_file = args.resolve_config_path();
    let mut config = TallyConfig::load_or_default(&config_file);
    config.general.port = args.resolve_port(config.general.port);
    if let Some(data_dir) = args.resolve_data_dir() {
        config.general.data_dir = data_dir;
    }
    if let Some(level) = args.resolve_log_level() {
        config.general.log_level = level;
    }

    // Tracing. RUST_LOG still wins over the configured level.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.general.log_level)),
        )
        .init();

    tracing::info!("Starting Tally v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_file.display(), "Configuration loaded");

    // Storage.
    let data_dir = resolve_data_dir(&config.general.data_dir);
    let db_path = data_dir.join("tally.db");
    let db = Arc::new(Database::new(&db_path)?);
    tracing::info!(path = %db_path.display(), "SQLite database opened");

    // NLU. Trained once, shared read-only.
    let classifier = Arc::new(IntentClassifier::train(&UtteranceCorpus::builtin()));
    tracing::info!("Intent classifier trained");

    // Chat pipeline.
    let ops = LedgerOps::new(
        CustomerRepository::new(Arc::clone(&db)),
        BillRepository::new(Arc::clone(&db)),
        config.chat.bill_list_limit,
    );
    let dispatcher = ChatDispatcher::new(
        classifier,
        ops,
        config.nlu.min_confidence,
        config.chat.max_message_length,
    );

    let state = AppState::new(config.clone(), dispatcher);

    routes::start_server(&config, state).await?;

    Ok(())
}
