//! Customer user model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::role::{CustomerRole, CustomerRoleName};
use crate::organization::Organization;
use crate::status::AccountStatus;

/// A user belonging to a customer organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerUser {
    /// Unique identifier.
    pub id: Uuid,
    /// Email address, unique across customer users.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Password hash (argon2 or bcrypt).
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// The user's own status.
    pub status: AccountStatus,
    /// Organization-scoped role.
    pub role: CustomerRole,
    /// Owning organization, resolved.
    pub organization: Organization,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker.
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Data required to create a customer user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCustomerUser {
    /// Owning organization.
    pub organization_id: Uuid,
    /// Email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Role to assign.
    pub role: CustomerRoleName,
    /// Initial status.
    pub status: AccountStatus,
}

/// The initial owner created together with a new organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOwner {
    /// Email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Pre-hashed password.
    pub password_hash: String,
}
