//! Ad portal server
//!
//! Main entry point that wires configuration, logging, the credential
//! store and the HTTP application together.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use adportal_api::{AppState, serve};
use adportal_core::config::AppConfig;
use adportal_core::config::logging::LogFormat;
use adportal_core::error::AppError;
use adportal_database::DatabasePool;
use adportal_database::migration::run_migrations;

#[tokio::main]
async fn main() {
    let env = std::env::var("ADPORTAL_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format {
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        LogFormat::Pretty => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting ad portal v{}", env!("CARGO_PKG_VERSION"));

    let db = DatabasePool::connect(&config.database).await?;

    tracing::info!("Running database migrations...");
    run_migrations(db.pool()).await?;

    let store = Arc::new(db.store());
    let state = AppState::new(config, store, Some(db.clone()))?;

    let result = serve(state).await;
    db.close().await;
    result
}
