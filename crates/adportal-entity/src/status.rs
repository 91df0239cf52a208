//! Account status shared by principals and organizations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a principal or an organization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "account_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountStatus {
    /// May sign in.
    Active,
    /// Temporarily disabled by an operator.
    Inactive,
    /// Suspended by an operator.
    Suspended,
    /// Awaiting approval.
    Pending,
}

impl AccountStatus {
    /// All statuses, in declaration order.
    pub const ALL: [AccountStatus; 4] = [
        Self::Active,
        Self::Inactive,
        Self::Suspended,
        Self::Pending,
    ];

    /// Whether this status passes a status gate.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Return the status as an uppercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
            Self::Suspended => "SUSPENDED",
            Self::Pending => "PENDING",
        }
    }
}

impl fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AccountStatus {
    type Err = adportal_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ACTIVE" => Ok(Self::Active),
            "INACTIVE" => Ok(Self::Inactive),
            "SUSPENDED" => Ok(Self::Suspended),
            "PENDING" => Ok(Self::Pending),
            _ => Err(adportal_core::AppError::validation(format!(
                "Invalid status: '{s}'. Expected one of: ACTIVE, INACTIVE, SUSPENDED, PENDING"
            ))),
        }
    }
}
