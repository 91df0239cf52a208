//! CLI command definitions and dispatch.

pub mod migrate;
pub mod org;
pub mod seed;
pub mod staff;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use adportal_core::config::AppConfig;
use adportal_core::error::AppError;
use adportal_database::{CredentialStore, DatabasePool};

use crate::output::OutputFormat;

/// Ad portal operator tooling
#[derive(Debug, Parser)]
#[command(name = "adportal-cli", version, about, long_about = None)]
pub struct Cli {
    /// Configuration environment (`config/{env}.toml`)
    #[arg(short, long, env = "ADPORTAL_ENV", default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Log store and hashing activity to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Apply database migrations
    Migrate,
    /// Load demo staff, organizations and customer users
    Seed(seed::SeedArgs),
    /// Staff management
    Staff(staff::StaffArgs),
    /// Organization management
    Org(org::OrgArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = AppConfig::load(&self.env)?;
        tracing::debug!(env = %self.env, "Configuration loaded");
        match &self.command {
            Commands::Migrate => migrate::execute(&config).await,
            Commands::Seed(args) => seed::execute(args, &config).await,
            Commands::Staff(args) => staff::execute(args, &config, self.format).await,
            Commands::Org(args) => org::execute(args, &config, self.format).await,
        }
    }
}

/// Helper: connect and wrap the pool in the PostgreSQL store
pub async fn connect_store(config: &AppConfig) -> Result<Arc<dyn CredentialStore>, AppError> {
    let pool = DatabasePool::connect(&config.database).await?;
    Ok(Arc::new(pool.store()))
}
