//! Organization management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;
use uuid::Uuid;

use adportal_core::config::AppConfig;
use adportal_core::error::AppError;
use adportal_entity::AccountStatus;

use crate::output::{self, OutputFormat};

/// Arguments for organization commands
#[derive(Debug, Args)]
pub struct OrgArgs {
    /// Organization subcommand
    #[command(subcommand)]
    pub command: OrgCommand,
}

/// Organization subcommands
#[derive(Debug, Subcommand)]
pub enum OrgCommand {
    /// List organizations
    List,
    /// Change an organization's status
    SetStatus {
        /// Organization ID
        id: Uuid,
        /// ACTIVE, INACTIVE, SUSPENDED or PENDING
        status: String,
    },
}

/// Organization display row for table output
#[derive(Debug, Serialize, Tabled)]
struct OrgRow {
    /// Organization ID
    id: String,
    /// Display name
    name: String,
    /// Company
    company: String,
    /// Plan
    plan: String,
    /// Status
    status: String,
    /// Created at
    created_at: String,
}

/// Execute organization commands
pub async fn execute(
    args: &OrgArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let store = super::connect_store(config).await?;

    match &args.command {
        OrgCommand::List => {
            let rows: Vec<OrgRow> = store
                .list_organizations()
                .await?
                .into_iter()
                .map(|o| OrgRow {
                    id: o.id.to_string(),
                    name: o.name,
                    company: o.company_name,
                    plan: o.plan,
                    status: o.status.to_string(),
                    created_at: o.created_at.format("%Y-%m-%d %H:%M").to_string(),
                })
                .collect();
            output::print_list(&rows, format)?;
        }
        OrgCommand::SetStatus { id, status } => {
            let status: AccountStatus = status.parse()?;
            let organization = store.set_organization_status(*id, status).await?;
            output::print_success(&format!(
                "Organization '{}' is now {}",
                organization.name, organization.status
            ));
            if !status.is_active() {
                println!(
                    "Members can no longer sign in. Sessions already issued stay valid until they expire \
                     unless the change is made through the staff API."
                );
            }
        }
    }

    Ok(())
}
