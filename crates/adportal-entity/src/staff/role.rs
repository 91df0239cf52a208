//! Staff role reference data.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Name of a platform-global staff role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StaffRoleName {
    /// Full system access and user management.
    #[serde(rename = "Administrator")]
    Administrator,
    /// Customer support and basic system access.
    #[serde(rename = "Support Agent")]
    SupportAgent,
}

impl StaffRoleName {
    /// Return the role name as stored and embedded in session claims.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Administrator => "Administrator",
            Self::SupportAgent => "Support Agent",
        }
    }

    /// Default description seeded for this role.
    pub fn default_description(&self) -> &'static str {
        match self {
            Self::Administrator => "Full system access and user management",
            Self::SupportAgent => "Customer support and basic system access",
        }
    }
}

impl fmt::Display for StaffRoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StaffRoleName {
    type Err = adportal_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Administrator" => Ok(Self::Administrator),
            "Support Agent" => Ok(Self::SupportAgent),
            _ => Err(adportal_core::AppError::validation(format!(
                "Invalid staff role: '{s}'. Expected one of: Administrator, Support Agent"
            ))),
        }
    }
}

/// A staff role row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffRole {
    /// Role identifier.
    pub id: Uuid,
    /// Role name.
    pub name: StaffRoleName,
    /// Human-readable description.
    pub description: String,
}
