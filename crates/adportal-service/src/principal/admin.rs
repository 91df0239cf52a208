//! Admin principal management: status changes and staff onboarding.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use adportal_auth::{PasswordHasher, RevocationList};
use adportal_core::error::AppError;
use adportal_database::CredentialStore;
use adportal_entity::staff::{CreateStaff, StaffPrincipal, StaffRoleName};
use adportal_entity::{AccountStatus, PrincipalKind};

use crate::context::RequestContext;
use crate::validation::{check_password, into_result};

/// A principal's status after a change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrincipalStatus {
    /// Principal ID.
    pub id: Uuid,
    /// Principal kind.
    pub kind: PrincipalKind,
    /// New status.
    pub status: AccountStatus,
}

/// Operator request to create a staff member.
#[derive(Clone, Validate)]
pub struct CreateStaffRequest {
    /// Staff number, e.g. `admin006`.
    #[validate(length(min = 1, max = 50, message = "must be 1 to 50 characters"))]
    pub staff_id: String,
    /// Email address.
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    /// Display name.
    #[validate(length(min = 1, max = 255, message = "must be 1 to 255 characters"))]
    pub name: String,
    /// Initial password.
    pub password: String,
    /// Role.
    pub role: StaffRoleName,
}

impl CreateStaffRequest {
    fn normalized(&self) -> Self {
        Self {
            staff_id: self.staff_id.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            name: self.name.trim().to_string(),
            password: self.password.clone(),
            role: self.role,
        }
    }
}

/// Handles status changes across all three principal kinds.
#[derive(Debug, Clone)]
pub struct PrincipalAdminService {
    store: Arc<dyn CredentialStore>,
    hasher: Arc<PasswordHasher>,
    revocations: Arc<RevocationList>,
}

impl PrincipalAdminService {
    /// Creates a new principal admin service.
    pub fn new(
        store: Arc<dyn CredentialStore>,
        hasher: Arc<PasswordHasher>,
        revocations: Arc<RevocationList>,
    ) -> Self {
        Self {
            store,
            hasher,
            revocations,
        }
    }

    /// Changes one principal's status.
    ///
    /// Staff may not change their own status. Non-ACTIVE revokes the
    /// principal's sessions; ACTIVE lifts the revocation.
    pub async fn set_status(
        &self,
        ctx: &RequestContext,
        kind: PrincipalKind,
        id: Uuid,
        status: AccountStatus,
    ) -> Result<PrincipalStatus, AppError> {
        ctx.require_staff()?;
        if kind == PrincipalKind::Staff && id == ctx.principal_id {
            return Err(AppError::validation("Cannot change your own status"));
        }

        let id = match kind {
            PrincipalKind::Staff => self.store.set_staff_status(id, status).await?.id,
            PrincipalKind::CustomerUser => self.store.set_customer_user_status(id, status).await?.id,
            PrincipalKind::SubCustomer => self.store.set_subcustomer_status(id, status).await?.id,
        };

        if status.is_active() {
            self.revocations.clear_principal(id).await;
        } else {
            self.revocations.revoke_principal(id).await;
        }

        info!(
            staff_id = %ctx.principal_id,
            principal_kind = %kind,
            principal_id = %id,
            status = %status,
            "Principal status changed"
        );

        Ok(PrincipalStatus { id, kind, status })
    }

    /// Creates an ACTIVE staff member. Operator tooling only.
    pub async fn create_staff(
        &self,
        request: &CreateStaffRequest,
        min_password_length: usize,
    ) -> Result<StaffPrincipal, AppError> {
        let request = request.normalized();
        let mut errors = request.validate().err().unwrap_or_else(ValidationErrors::new);
        check_password(&mut errors, "password", &request.password, min_password_length);
        into_result(errors)?;

        let password_hash = self
            .hasher
            .hash_password_blocking(request.password.clone())
            .await?;

        let staff = self
            .store
            .create_staff(&CreateStaff {
                staff_id: request.staff_id,
                email: request.email,
                name: request.name,
                password_hash,
                role: request.role,
                status: AccountStatus::Active,
            })
            .await?;

        info!(principal_id = %staff.id, role = %staff.role.name, "Staff member created");
        Ok(staff)
    }
}
