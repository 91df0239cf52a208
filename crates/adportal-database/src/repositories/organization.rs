//! Organization repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use adportal_core::error::{AppError, ErrorKind};
use adportal_core::result::AppResult;
use adportal_entity::AccountStatus;
use adportal_entity::customer::NewOwner;
use adportal_entity::organization::{CreateOrganization, Organization, UpdateOrganization};

/// Repository for customer organizations.
#[derive(Debug, Clone)]
pub struct OrganizationRepository {
    pool: PgPool,
}

impl OrganizationRepository {
    /// Create a new organization repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a non-deleted organization by id.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Organization>> {
        sqlx::query_as::<_, Organization>(
            "SELECT * FROM organizations WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find organization by id", e)
        })
    }

    /// List non-deleted organizations, newest first.
    pub async fn find_all(&self) -> AppResult<Vec<Organization>> {
        sqlx::query_as::<_, Organization>(
            "SELECT * FROM organizations WHERE deleted_at IS NULL ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list organizations", e))
    }

    /// Insert an organization and its owner in one transaction.
    ///
    /// Returns the organization and the new owner's id.
    pub async fn create_with_owner(
        &self,
        data: &CreateOrganization,
        owner: &NewOwner,
    ) -> AppResult<(Organization, Uuid)> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let organization = sqlx::query_as::<_, Organization>(
            "INSERT INTO organizations (name, company_name, plan, status) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.company_name)
        .bind(&data.plan)
        .bind(data.status)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create organization", e)
        })?;

        let owner_id: Uuid = sqlx::query_scalar(
            "INSERT INTO customer_users (organization_id, role_id, email, name, password_hash, status) \
             SELECT $1, r.id, $2, $3, $4, 'ACTIVE' FROM customer_roles r WHERE r.name = 'Owner' \
             RETURNING id",
        )
        .bind(organization.id)
        .bind(&owner.email)
        .bind(&owner.name)
        .bind(&owner.password_hash)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("customer_users_email_key") =>
            {
                AppError::conflict(format!("Email '{}' is already in use", owner.email))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create owner", e),
        })?
        .ok_or_else(|| AppError::database("Customer role 'Owner' is not seeded"))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit organization", e)
        })?;

        Ok((organization, owner_id))
    }

    /// Update descriptive fields, keeping any field left as `None`.
    pub async fn update(&self, id: Uuid, data: &UpdateOrganization) -> AppResult<Organization> {
        sqlx::query_as::<_, Organization>(
            "UPDATE organizations SET name = COALESCE($2, name), \
                                      company_name = COALESCE($3, company_name), \
                                      plan = COALESCE($4, plan), \
                                      updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.company_name)
        .bind(&data.plan)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update organization", e))?
        .ok_or_else(|| AppError::not_found(format!("Organization {id} not found")))
    }

    /// Change an organization's status.
    pub async fn update_status(&self, id: Uuid, status: AccountStatus) -> AppResult<Organization> {
        sqlx::query_as::<_, Organization>(
            "UPDATE organizations SET status = $2, updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update organization status", e)
        })?
        .ok_or_else(|| AppError::not_found(format!("Organization {id} not found")))
    }

    /// Soft-delete an organization.
    pub async fn soft_delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE organizations SET deleted_at = NOW(), updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete organization", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Organization {id} not found")));
        }
        Ok(())
    }
}
