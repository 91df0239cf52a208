//! Demo data seeding command.

use clap::Args;

use adportal_auth::PasswordHasher;
use adportal_core::config::AppConfig;
use adportal_core::error::AppError;
use adportal_database::seed::{DEMO_PASSWORD, seed_demo_data};

use crate::output;

/// Arguments for the seed command
#[derive(Debug, Args)]
pub struct SeedArgs {
    /// Skip confirmation prompt
    #[arg(long)]
    pub yes: bool,
}

/// Seed demo accounts, skipping any email that already exists.
pub async fn execute(args: &SeedArgs, config: &AppConfig) -> Result<(), AppError> {
    if !args.yes {
        let confirm = dialoguer::Confirm::new()
            .with_prompt(format!(
                "Create demo accounts with the shared password '{DEMO_PASSWORD}'?"
            ))
            .default(false)
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {e}")))?;

        if !confirm {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let store = super::connect_store(config).await?;
    let hasher = PasswordHasher::new(&config.auth)?;
    let password_hash = hasher
        .hash_password_blocking(DEMO_PASSWORD.to_string())
        .await?;

    let summary = seed_demo_data(store.as_ref(), &password_hash).await?;

    output::print_success("Demo data seeded.");
    output::print_kv("Staff", &summary.staff.to_string());
    output::print_kv("Organizations", &summary.organizations.to_string());
    output::print_kv("Customer users", &summary.customer_users.to_string());
    Ok(())
}
