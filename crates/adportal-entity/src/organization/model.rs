//! Organization entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::status::AccountStatus;

/// A customer organization. Customer users and sub-customers belong to one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Organization {
    /// Unique identifier.
    pub id: Uuid,
    /// Display name (e.g. "Acme Corporation").
    pub name: String,
    /// Short company name (e.g. "Acme Corp").
    pub company_name: String,
    /// Plan tier label.
    pub plan: String,
    /// Organization status; gates every member's sign-in.
    pub status: AccountStatus,
    /// When the organization was created.
    pub created_at: DateTime<Utc>,
    /// When the organization was last updated.
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Organization {
    /// Whether the organization has been soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Data required to create an organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrganization {
    /// Display name.
    pub name: String,
    /// Short company name.
    pub company_name: String,
    /// Plan tier label.
    pub plan: String,
    /// Initial status.
    pub status: AccountStatus,
}

/// Partial update of an organization's descriptive fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateOrganization {
    /// New display name.
    pub name: Option<String>,
    /// New company name.
    pub company_name: Option<String>,
    /// New plan tier.
    pub plan: Option<String>,
}
