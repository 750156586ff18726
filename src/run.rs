//! Startup sequence: configuration, services, then the Telegram dispatcher

use crate::arguments;
use crate::config::{self, with_config};
use crate::database::connect_store;
use crate::logger::{self, LogTag};
use crate::paths;
use crate::solana::ChainClient;
use crate::state::AppState;
use crate::telegram::{self, SessionStore};
use crate::upload::AssetUploader;
use anyhow::{anyhow, Context};
use std::sync::Arc;
use std::time::Duration;

const SESSION_PRUNE_INTERVAL: Duration = Duration::from_secs(300);

/// Full bot lifecycle; returns once the dispatcher stops
pub async fn run_bot() -> anyhow::Result<()> {
    logger::info(LogTag::System, "Ziptos starting up...");

    match dotenv::dotenv() {
        Ok(path) => logger::debug(
            LogTag::Config,
            &format!("Loaded environment from {}", path.display()),
        ),
        Err(_) => logger::debug(LogTag::Config, "No .env file found"),
    }

    // 1. Configuration
    let config_path = arguments::config_path_override().unwrap_or_else(paths::get_config_path);

    if arguments::has_arg("--write-config") {
        config::write_config_template(&config_path).map_err(|e| anyhow!(e))?;
        logger::info(
            LogTag::Config,
            &format!("Configuration written to {}", config_path.display()),
        );
        return Ok(());
    }

    config::load_config_from_path(&config_path).map_err(|e| anyhow!(e))?;
    logger::info(
        LogTag::Config,
        &format!("Configuration loaded from {}", config_path.display()),
    );

    with_config(|c| c.validate()).map_err(|e| anyhow!("Invalid configuration: {}", e))?;

    let (database, solana, pinata, telegram_config, session_minutes) = with_config(|c| {
        (
            c.database.clone(),
            c.solana.clone(),
            c.pinata.clone(),
            c.telegram.clone(),
            c.wizard.session_timeout_minutes,
        )
    });

    // 2. Services
    let store = connect_store(&database)
        .await
        .context("Failed to connect to the database")?;
    logger::info(LogTag::Database, &format!("Store ready ({})", store.name()));
    let chain = ChainClient::new(&solana).context("Failed to create the RPC client")?;
    let uploader =
        AssetUploader::new(&pinata, &telegram_config).context("Failed to set up uploads")?;
    let sessions = SessionStore::from_minutes(session_minutes);

    let state = Arc::new(AppState::new(store, chain, uploader, sessions));

    // 3. Background session cleanup
    let prune_state = state.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_PRUNE_INTERVAL);
        loop {
            interval.tick().await;
            let dropped = prune_state.sessions.prune_expired().await;
            if dropped > 0 {
                logger::debug(
                    LogTag::Telegram,
                    &format!("Dropped {} expired conversations", dropped),
                );
            }
        }
    });

    // 4. Telegram dispatcher (blocks until Ctrl-C)
    telegram::run_bot(state)
        .await
        .context("Telegram bot stopped with an error")?;

    logger::info(LogTag::System, "Ziptos shut down");
    Ok(())
}
