//! Request context carrying the signed-in principal and its tenant scope.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use adportal_auth::TokenClaims;
use adportal_core::error::AppError;
use adportal_entity::PrincipalKind;
use adportal_entity::customer::CustomerRoleName;

/// Context for the current authenticated request.
///
/// Built by the guard middleware from verified token claims and passed
/// into service methods so every operation knows who is acting and in
/// which organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The principal's ID.
    pub principal_id: Uuid,
    /// Which kind of principal is acting.
    pub kind: PrincipalKind,
    /// Staff role name or the fixed customer marker.
    pub effective_role: String,
    /// Organization scope, absent for staff.
    pub organization_id: Option<Uuid>,
    /// Customer-user role inside the organization.
    pub organization_role: Option<CustomerRoleName>,
    /// Principal email.
    pub email: String,
    /// Token identifier.
    pub session_id: Uuid,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Builds a context from verified token claims.
    pub fn from_claims(claims: &TokenClaims) -> Self {
        let session = &claims.session;
        Self {
            principal_id: session.principal_id,
            kind: session.principal_kind,
            effective_role: session.effective_role.clone(),
            organization_id: session.organization_id,
            organization_role: session.organization_role,
            email: session.email.clone(),
            session_id: claims.jti,
            request_time: Utc::now(),
        }
    }

    /// Returns whether the caller is platform staff.
    pub fn is_staff(&self) -> bool {
        self.kind == PrincipalKind::Staff
            && matches!(self.effective_role.as_str(), "Administrator" | "Support Agent")
    }

    /// Fails unless the caller is platform staff.
    pub fn require_staff(&self) -> Result<(), AppError> {
        if self.is_staff() {
            Ok(())
        } else {
            Err(AppError::authorization("Staff access required"))
        }
    }

    /// Returns the caller's organization or fails.
    pub fn require_organization(&self) -> Result<Uuid, AppError> {
        self.organization_id
            .ok_or_else(|| AppError::authorization("Organization scope required"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use adportal_auth::SessionClaims;
    use adportal_core::error::ErrorKind;

    fn claims(kind: PrincipalKind, role: &str, org: Option<Uuid>) -> TokenClaims {
        TokenClaims {
            session: SessionClaims {
                principal_id: Uuid::new_v4(),
                email: "someone@example.com".to_string(),
                display_name: "Someone".to_string(),
                principal_kind: kind,
                effective_role: role.to_string(),
                organization_role: None,
                organization_id: org,
                organization_name: None,
                company_name: None,
                organization_plan: None,
            },
            iat: 0,
            exp: 0,
            jti: Uuid::new_v4(),
        }
    }

    #[test]
    fn test_staff_context() {
        let ctx = RequestContext::from_claims(&claims(PrincipalKind::Staff, "Support Agent", None));
        assert!(ctx.is_staff());
        assert!(ctx.require_staff().is_ok());
        assert_eq!(
            ctx.require_organization().unwrap_err().kind,
            ErrorKind::Authorization
        );
    }

    #[test]
    fn test_customer_context_is_not_staff() {
        let org = Uuid::new_v4();
        let ctx = RequestContext::from_claims(&claims(
            PrincipalKind::CustomerUser,
            "customer-user",
            Some(org),
        ));
        assert!(!ctx.is_staff());
        assert!(ctx.require_staff().is_err());
        assert_eq!(ctx.require_organization().unwrap(), org);
    }
}
