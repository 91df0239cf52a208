//! Staff management CLI commands.

use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use adportal_auth::{PasswordHasher, RevocationList};
use adportal_core::config::AppConfig;
use adportal_core::error::AppError;
use adportal_entity::staff::StaffRoleName;
use adportal_service::{CreateStaffRequest, PrincipalAdminService};

use crate::output::{self, OutputFormat};

/// Arguments for staff commands
#[derive(Debug, Args)]
pub struct StaffArgs {
    /// Staff subcommand
    #[command(subcommand)]
    pub command: StaffCommand,
}

/// Staff subcommands
#[derive(Debug, Subcommand)]
pub enum StaffCommand {
    /// List staff members
    List,
    /// Create an ACTIVE staff member
    Create {
        /// Staff number, e.g. admin006
        #[arg(long)]
        staff_id: String,
        /// Email address
        #[arg(long)]
        email: String,
        /// Display name
        #[arg(long)]
        name: String,
        /// Role: "Administrator" or "Support Agent"
        #[arg(long, default_value = "Support Agent")]
        role: String,
        /// Initial password; prompted when omitted
        #[arg(long)]
        password: Option<String>,
    },
}

/// Staff display row for table output
#[derive(Debug, Serialize, Tabled)]
struct StaffRow {
    /// Staff number
    staff_id: String,
    /// Email
    email: String,
    /// Name
    name: String,
    /// Role
    role: String,
    /// Status
    status: String,
}

/// Execute staff commands
pub async fn execute(
    args: &StaffArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let store = super::connect_store(config).await?;

    match &args.command {
        StaffCommand::List => {
            let rows: Vec<StaffRow> = store
                .list_staff()
                .await?
                .into_iter()
                .map(|s| StaffRow {
                    staff_id: s.staff_id,
                    email: s.email,
                    name: s.name,
                    role: s.role.name.to_string(),
                    status: s.status.to_string(),
                })
                .collect();
            output::print_list(&rows, format)?;
        }
        StaffCommand::Create {
            staff_id,
            email,
            name,
            role,
            password,
        } => {
            let role: StaffRoleName = role.parse()?;
            let password = match password {
                Some(p) => p.clone(),
                None => dialoguer::Password::new()
                    .with_prompt("Password")
                    .with_confirmation("Confirm password", "Passwords do not match")
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {e}")))?,
            };

            let service = PrincipalAdminService::new(
                Arc::clone(&store),
                Arc::new(PasswordHasher::new(&config.auth)?),
                Arc::new(RevocationList::new(Duration::from_secs(60))),
            );
            let staff = service
                .create_staff(
                    &CreateStaffRequest {
                        staff_id: staff_id.clone(),
                        email: email.clone(),
                        name: name.clone(),
                        password,
                        role,
                    },
                    config.auth.password_min_length,
                )
                .await?;

            output::print_success(&format!("Staff member '{}' created", staff.staff_id));
            output::print_kv("ID", &staff.id.to_string());
            output::print_kv("Role", staff.role.name.as_str());
        }
    }

    Ok(())
}
