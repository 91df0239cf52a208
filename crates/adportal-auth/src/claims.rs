//! Session claims and the mapping from an authenticated principal.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use adportal_entity::customer::CustomerRoleName;
use adportal_entity::{AuthenticatedPrincipal, PrincipalKind};

/// Effective role carried by every customer user.
pub const CUSTOMER_USER_ROLE: &str = "customer-user";

/// Effective role carried by every sub-customer.
pub const SUBCUSTOMER_ROLE: &str = "subcustomer";

/// Normalized identity and scope of a signed-in principal.
///
/// Never carries password hashes or platform tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionClaims {
    /// Principal identifier.
    pub principal_id: Uuid,
    /// Principal email.
    pub email: String,
    /// Display name.
    pub display_name: String,
    /// Principal kind.
    pub principal_kind: PrincipalKind,
    /// Staff role name, or the fixed customer-user / subcustomer marker.
    pub effective_role: String,
    /// Organization-scoped role of a customer user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_role: Option<CustomerRoleName>,
    /// Owning organization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<Uuid>,
    /// Owning organization's display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_name: Option<String>,
    /// Owning organization's company name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    /// Owning organization's plan; customer users only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_plan: Option<String>,
}

impl SessionClaims {
    /// Whether the effective role is a staff role.
    pub fn is_staff_role(&self) -> bool {
        matches!(self.effective_role.as_str(), "Administrator" | "Support Agent")
    }
}

/// Map an authenticated principal into session claims.
pub fn build_claims(principal: &AuthenticatedPrincipal) -> SessionClaims {
    match principal {
        AuthenticatedPrincipal::Staff(staff) => SessionClaims {
            principal_id: staff.id,
            email: staff.email.clone(),
            display_name: staff.name.clone(),
            principal_kind: PrincipalKind::Staff,
            effective_role: staff.role.name.as_str().to_string(),
            organization_role: None,
            organization_id: None,
            organization_name: None,
            company_name: None,
            organization_plan: None,
        },
        AuthenticatedPrincipal::CustomerUser(user) => SessionClaims {
            principal_id: user.id,
            email: user.email.clone(),
            display_name: user.name.clone(),
            principal_kind: PrincipalKind::CustomerUser,
            effective_role: CUSTOMER_USER_ROLE.to_string(),
            organization_role: Some(user.role.name),
            organization_id: Some(user.organization.id),
            organization_name: Some(user.organization.name.clone()),
            company_name: Some(user.organization.company_name.clone()),
            organization_plan: Some(user.organization.plan.clone()),
        },
        AuthenticatedPrincipal::SubCustomer(sub) => SessionClaims {
            principal_id: sub.id,
            email: sub.email.clone(),
            display_name: sub.name.clone(),
            principal_kind: PrincipalKind::SubCustomer,
            effective_role: SUBCUSTOMER_ROLE.to_string(),
            organization_role: None,
            organization_id: Some(sub.organization.id),
            organization_name: Some(sub.organization.name.clone()),
            company_name: Some(sub.organization.company_name.clone()),
            organization_plan: None,
        },
    }
}
