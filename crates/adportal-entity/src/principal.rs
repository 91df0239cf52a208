//! Principal kinds and the capability shared by every credentialed record.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::customer::CustomerUser;
use crate::organization::Organization;
use crate::staff::StaffPrincipal;
use crate::status::AccountStatus;
use crate::subcustomer::SubCustomer;

/// The three disjoint kinds of authenticatable identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrincipalKind {
    /// Platform staff.
    #[serde(rename = "staff")]
    Staff,
    /// A user of a customer organization.
    #[serde(rename = "customer-user")]
    CustomerUser,
    /// A sub-customer of a customer organization.
    #[serde(rename = "subcustomer")]
    SubCustomer,
}

impl PrincipalKind {
    /// Return the kind as its wire string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Staff => "staff",
            Self::CustomerUser => "customer-user",
            Self::SubCustomer => "subcustomer",
        }
    }

    /// Whether principals of this kind belong to an organization.
    pub fn has_organization(&self) -> bool {
        !matches!(self, Self::Staff)
    }
}

impl fmt::Display for PrincipalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PrincipalKind {
    type Err = adportal_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "staff" => Ok(Self::Staff),
            "customer" | "customer-user" | "customer_user" => Ok(Self::CustomerUser),
            "subcustomer" | "sub-customer" | "sub_customer" => Ok(Self::SubCustomer),
            _ => Err(adportal_core::AppError::validation(format!(
                "Invalid principal kind: '{s}'. Expected one of: staff, customer, subcustomer"
            ))),
        }
    }
}

/// A record that can be authenticated with an email and password.
pub trait Credentialed {
    /// The principal kind this record belongs to.
    const KIND: PrincipalKind;

    /// Record identifier.
    fn id(&self) -> Uuid;

    /// Stored email address.
    fn email(&self) -> &str;

    /// Stored password hash.
    fn password_hash(&self) -> &str;

    /// The record's own status.
    fn status(&self) -> AccountStatus;

    /// The owning organization, if this kind has one.
    fn organization(&self) -> Option<&Organization>;

    /// Wrap the record as an authenticated principal.
    fn into_principal(self) -> AuthenticatedPrincipal;
}

impl Credentialed for StaffPrincipal {
    const KIND: PrincipalKind = PrincipalKind::Staff;

    fn id(&self) -> Uuid {
        self.id
    }

    fn email(&self) -> &str {
        &self.email
    }

    fn password_hash(&self) -> &str {
        &self.password_hash
    }

    fn status(&self) -> AccountStatus {
        self.status
    }

    fn organization(&self) -> Option<&Organization> {
        None
    }

    fn into_principal(self) -> AuthenticatedPrincipal {
        AuthenticatedPrincipal::Staff(self)
    }
}

impl Credentialed for CustomerUser {
    const KIND: PrincipalKind = PrincipalKind::CustomerUser;

    fn id(&self) -> Uuid {
        self.id
    }

    fn email(&self) -> &str {
        &self.email
    }

    fn password_hash(&self) -> &str {
        &self.password_hash
    }

    fn status(&self) -> AccountStatus {
        self.status
    }

    fn organization(&self) -> Option<&Organization> {
        Some(&self.organization)
    }

    fn into_principal(self) -> AuthenticatedPrincipal {
        AuthenticatedPrincipal::CustomerUser(self)
    }
}

impl Credentialed for SubCustomer {
    const KIND: PrincipalKind = PrincipalKind::SubCustomer;

    fn id(&self) -> Uuid {
        self.id
    }

    fn email(&self) -> &str {
        &self.email
    }

    fn password_hash(&self) -> &str {
        &self.password_hash
    }

    fn status(&self) -> AccountStatus {
        self.status
    }

    fn organization(&self) -> Option<&Organization> {
        Some(&self.organization)
    }

    fn into_principal(self) -> AuthenticatedPrincipal {
        AuthenticatedPrincipal::SubCustomer(self)
    }
}

/// A principal that passed every authentication gate, tagged by kind.
#[derive(Debug, Clone)]
pub enum AuthenticatedPrincipal {
    /// Platform staff.
    Staff(StaffPrincipal),
    /// Customer user.
    CustomerUser(CustomerUser),
    /// Sub-customer.
    SubCustomer(SubCustomer),
}

impl AuthenticatedPrincipal {
    /// The principal's kind.
    pub fn kind(&self) -> PrincipalKind {
        match self {
            Self::Staff(_) => PrincipalKind::Staff,
            Self::CustomerUser(_) => PrincipalKind::CustomerUser,
            Self::SubCustomer(_) => PrincipalKind::SubCustomer,
        }
    }

    /// The principal's identifier.
    pub fn id(&self) -> Uuid {
        match self {
            Self::Staff(p) => p.id,
            Self::CustomerUser(p) => p.id,
            Self::SubCustomer(p) => p.id,
        }
    }

    /// The owning organization, if any.
    pub fn organization(&self) -> Option<&Organization> {
        match self {
            Self::Staff(_) => None,
            Self::CustomerUser(p) => Some(&p.organization),
            Self::SubCustomer(p) => Some(&p.organization),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parse_accepts_path_aliases() {
        assert_eq!(
            "customer".parse::<PrincipalKind>().unwrap(),
            PrincipalKind::CustomerUser
        );
        assert_eq!(
            "sub-customer".parse::<PrincipalKind>().unwrap(),
            PrincipalKind::SubCustomer
        );
        assert!("admin".parse::<PrincipalKind>().is_err());
    }

    #[test]
    fn test_kind_wire_strings() {
        assert_eq!(
            serde_json::to_string(&PrincipalKind::CustomerUser).unwrap(),
            "\"customer-user\""
        );
        assert!(!PrincipalKind::Staff.has_organization());
        assert!(PrincipalKind::SubCustomer.has_organization());
    }
}
