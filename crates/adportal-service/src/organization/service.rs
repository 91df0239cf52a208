//! Staff-side organization management.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use adportal_auth::{PasswordHasher, RevocationList};
use adportal_core::config::auth::AuthConfig;
use adportal_core::error::AppError;
use adportal_database::CredentialStore;
use adportal_entity::AccountStatus;
use adportal_entity::customer::{CustomerUser, NewOwner};
use adportal_entity::organization::{CreateOrganization, Organization, UpdateOrganization};

use super::request::{ProvisionOrganizationRequest, UpdateOrganizationRequest};
use crate::context::RequestContext;

/// A newly provisioned organization and its owner.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionedOrganization {
    /// The organization.
    pub organization: Organization,
    /// Its initial `Owner` user.
    pub owner: CustomerUser,
}

/// Provisioning, lookup and status administration of organizations.
#[derive(Debug, Clone)]
pub struct OrganizationService {
    store: Arc<dyn CredentialStore>,
    hasher: Arc<PasswordHasher>,
    revocations: Arc<RevocationList>,
    password_min_length: usize,
}

impl OrganizationService {
    /// Creates a new organization service.
    pub fn new(
        store: Arc<dyn CredentialStore>,
        hasher: Arc<PasswordHasher>,
        revocations: Arc<RevocationList>,
        config: &AuthConfig,
    ) -> Self {
        Self {
            store,
            hasher,
            revocations,
            password_min_length: config.password_min_length,
        }
    }

    /// Creates an organization and its owner in one step.
    ///
    /// Fails with `Validation` listing every bad field, or with `Conflict`
    /// when the owner email belongs to any customer user. Nothing is
    /// persisted on failure.
    pub async fn provision(
        &self,
        ctx: &RequestContext,
        request: &ProvisionOrganizationRequest,
    ) -> Result<ProvisionedOrganization, AppError> {
        ctx.require_staff()?;

        let request = request.normalized();
        request.check(self.password_min_length)?;

        if self.store.customer_email_exists(&request.owner_email).await? {
            return Err(AppError::conflict(
                "A customer user with this email already exists",
            ));
        }

        let password_hash = self
            .hasher
            .hash_password_blocking(request.owner_password.clone())
            .await?;

        let (organization, owner) = self
            .store
            .create_organization_with_owner(
                &CreateOrganization {
                    name: request.org_display_name,
                    company_name: request.company_name,
                    plan: request.plan,
                    status: AccountStatus::Active,
                },
                &NewOwner {
                    email: request.owner_email,
                    name: request.owner_name,
                    password_hash,
                },
            )
            .await?;

        info!(
            staff_id = %ctx.principal_id,
            organization_id = %organization.id,
            owner_id = %owner.id,
            "Organization provisioned"
        );

        Ok(ProvisionedOrganization {
            organization,
            owner,
        })
    }

    /// Lists organizations, newest first.
    pub async fn list(&self, ctx: &RequestContext) -> Result<Vec<Organization>, AppError> {
        ctx.require_staff()?;
        self.store.list_organizations().await
    }

    /// Gets one organization.
    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<Organization, AppError> {
        ctx.require_staff()?;
        self.store
            .find_organization(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Organization {id} not found")))
    }

    /// Lists an organization's customer users.
    pub async fn members(
        &self,
        ctx: &RequestContext,
        id: Uuid,
    ) -> Result<Vec<CustomerUser>, AppError> {
        self.get(ctx, id).await?;
        self.store.list_customer_users(id).await
    }

    /// Updates descriptive fields.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        request: &UpdateOrganizationRequest,
    ) -> Result<Organization, AppError> {
        ctx.require_staff()?;
        let request = request.normalized();
        request.check()?;

        let organization = self
            .store
            .update_organization(
                id,
                &UpdateOrganization {
                    name: request.org_display_name,
                    company_name: request.company_name,
                    plan: request.plan,
                },
            )
            .await?;

        info!(staff_id = %ctx.principal_id, organization_id = %id, "Organization updated");
        Ok(organization)
    }

    /// Changes an organization's status.
    ///
    /// Any non-ACTIVE status revokes the sessions of every member; going
    /// back to ACTIVE lifts that revocation.
    pub async fn set_status(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        status: AccountStatus,
    ) -> Result<Organization, AppError> {
        ctx.require_staff()?;
        let organization = self.store.set_organization_status(id, status).await?;

        if status.is_active() {
            self.revocations.clear_organization(id).await;
        } else {
            self.revocations.revoke_organization(id).await;
        }

        info!(
            staff_id = %ctx.principal_id,
            organization_id = %id,
            status = %status,
            "Organization status changed"
        );
        Ok(organization)
    }

    /// Soft-deletes an organization and revokes its members' sessions.
    pub async fn soft_delete(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        ctx.require_staff()?;
        self.store.soft_delete_organization(id).await?;
        self.revocations.revoke_organization(id).await;
        info!(staff_id = %ctx.principal_id, organization_id = %id, "Organization deleted");
        Ok(())
    }
}
