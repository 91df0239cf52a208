//! Staff principal model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::role::{StaffRole, StaffRoleName};
use crate::status::AccountStatus;

/// A platform staff member. Staff have no owning organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffPrincipal {
    /// Unique identifier.
    pub id: Uuid,
    /// Human-assigned staff number (e.g. `admin001`).
    pub staff_id: String,
    /// Email address, unique case-insensitively.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Password hash (argon2 or bcrypt).
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Account status.
    pub status: AccountStatus,
    /// Assigned role.
    pub role: StaffRole,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker.
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Data required to create a staff principal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateStaff {
    /// Staff number.
    pub staff_id: String,
    /// Email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Role to assign.
    pub role: StaffRoleName,
    /// Initial status.
    pub status: AccountStatus,
}
