//! Sub-customer model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::organization::Organization;
use crate::status::AccountStatus;

/// A narrower-scope user under a customer organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubCustomer {
    /// Unique identifier.
    pub id: Uuid,
    /// Email address, unique across sub-customers.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Password hash (argon2 or bcrypt).
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// The sub-customer's own status.
    pub status: AccountStatus,
    /// Owning organization, resolved.
    pub organization: Organization,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker.
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Data required to create a sub-customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSubCustomer {
    /// Owning organization.
    pub organization_id: Uuid,
    /// Email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Initial status.
    pub status: AccountStatus,
}
