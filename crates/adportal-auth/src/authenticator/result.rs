//! Authentication outcomes.

use serde::{Deserialize, Serialize};
use std::fmt;

use adportal_entity::{AccountStatus, AuthenticatedPrincipal};

/// Why a sign-in attempt was rejected.
///
/// These never leave the server unmapped; see [`crate::surface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    /// Unknown email, wrong password, or soft-deleted record.
    InvalidCredentials,
    /// The principal's own status is INACTIVE.
    AccountInactive,
    /// The principal's own status is SUSPENDED.
    AccountSuspended,
    /// The principal's own status is PENDING.
    AccountPending,
    /// The owning organization is INACTIVE.
    OrganizationInactive,
    /// The owning organization is SUSPENDED.
    OrganizationSuspended,
    /// The owning organization is PENDING.
    OrganizationPending,
}

impl RejectionReason {
    /// Reason for a principal whose own status fails the gate.
    pub fn for_account(status: AccountStatus) -> Option<Self> {
        match status {
            AccountStatus::Active => None,
            AccountStatus::Inactive => Some(Self::AccountInactive),
            AccountStatus::Suspended => Some(Self::AccountSuspended),
            AccountStatus::Pending => Some(Self::AccountPending),
        }
    }

    /// Reason for an organization whose status fails the gate.
    pub fn for_organization(status: AccountStatus) -> Option<Self> {
        match status {
            AccountStatus::Active => None,
            AccountStatus::Inactive => Some(Self::OrganizationInactive),
            AccountStatus::Suspended => Some(Self::OrganizationSuspended),
            AccountStatus::Pending => Some(Self::OrganizationPending),
        }
    }

    /// Return the reason as a snake_case string for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "invalid_credentials",
            Self::AccountInactive => "account_inactive",
            Self::AccountSuspended => "account_suspended",
            Self::AccountPending => "account_pending",
            Self::OrganizationInactive => "organization_inactive",
            Self::OrganizationSuspended => "organization_suspended",
            Self::OrganizationPending => "organization_pending",
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of one authentication attempt.
#[derive(Debug, Clone)]
pub enum AuthResult {
    /// Every gate passed.
    Success(AuthenticatedPrincipal),
    /// The attempt was rejected.
    Rejected {
        /// Why.
        reason: RejectionReason,
    },
}

impl AuthResult {
    /// Shorthand for a rejection.
    pub fn rejected(reason: RejectionReason) -> Self {
        Self::Rejected { reason }
    }

    /// The rejection reason, if any.
    pub fn rejection(&self) -> Option<RejectionReason> {
        match self {
            Self::Success(_) => None,
            Self::Rejected { reason } => Some(*reason),
        }
    }
}
