//! Customer role reference data.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Organization-scoped role of a customer user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CustomerRoleName {
    /// Manages the organization and its users.
    Owner,
    /// Edits campaigns and connected accounts.
    Editor,
    /// Read-only access.
    Viewer,
}

impl CustomerRoleName {
    /// Return the role name as stored and embedded in session claims.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "Owner",
            Self::Editor => "Editor",
            Self::Viewer => "Viewer",
        }
    }

    /// Default description seeded for this role.
    pub fn default_description(&self) -> &'static str {
        match self {
            Self::Owner => "Full access to organization settings, users and campaigns",
            Self::Editor => "Can create and edit campaigns and connected accounts",
            Self::Viewer => "Read-only access to campaigns and analytics",
        }
    }

    /// Whether this role may change the organization's connected accounts.
    pub fn can_edit(&self) -> bool {
        matches!(self, Self::Owner | Self::Editor)
    }
}

impl fmt::Display for CustomerRoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CustomerRoleName {
    type Err = adportal_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Owner" => Ok(Self::Owner),
            "Editor" => Ok(Self::Editor),
            "Viewer" => Ok(Self::Viewer),
            _ => Err(adportal_core::AppError::validation(format!(
                "Invalid customer role: '{s}'. Expected one of: Owner, Editor, Viewer"
            ))),
        }
    }
}

/// A customer role row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRole {
    /// Role identifier.
    pub id: Uuid,
    /// Role name.
    pub name: CustomerRoleName,
    /// Human-readable description.
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_owner_and_editor_can_edit() {
        assert!(CustomerRoleName::Owner.can_edit());
        assert!(CustomerRoleName::Editor.can_edit());
        assert!(!CustomerRoleName::Viewer.can_edit());
    }

    #[test]
    fn test_round_trip_name() {
        for role in [
            CustomerRoleName::Owner,
            CustomerRoleName::Editor,
            CustomerRoleName::Viewer,
        ] {
            assert_eq!(role.as_str().parse::<CustomerRoleName>().unwrap(), role);
        }
    }
}
