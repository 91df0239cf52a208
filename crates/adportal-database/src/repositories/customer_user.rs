//! Customer user repository implementation.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use adportal_core::error::{AppError, ErrorKind};
use adportal_core::result::AppResult;
use adportal_entity::AccountStatus;
use adportal_entity::customer::{CreateCustomerUser, CustomerRole, CustomerUser};
use adportal_entity::organization::Organization;

const CUSTOMER_USER_SELECT: &str = "SELECT u.id, u.email, u.name, u.password_hash, u.status, \
            u.created_at, u.updated_at, u.deleted_at, \
            r.id AS role_id, r.name AS role_name, r.description AS role_description, \
            o.id AS org_id, o.name AS org_name, o.company_name AS org_company_name, \
            o.plan AS org_plan, o.status AS org_status, o.created_at AS org_created_at, \
            o.updated_at AS org_updated_at, o.deleted_at AS org_deleted_at \
     FROM customer_users u \
     JOIN customer_roles r ON r.id = u.role_id \
     JOIN organizations o ON o.id = u.organization_id";

const VISIBLE: &str = "u.deleted_at IS NULL AND o.deleted_at IS NULL";

/// Flat row of a customer user joined with its role and organization.
#[derive(Debug, FromRow)]
struct CustomerUserRow {
    id: Uuid,
    email: String,
    name: String,
    password_hash: String,
    status: AccountStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
    role_id: Uuid,
    role_name: String,
    role_description: String,
    org_id: Uuid,
    org_name: String,
    org_company_name: String,
    org_plan: String,
    org_status: AccountStatus,
    org_created_at: DateTime<Utc>,
    org_updated_at: DateTime<Utc>,
    org_deleted_at: Option<DateTime<Utc>>,
}

impl TryFrom<CustomerUserRow> for CustomerUser {
    type Error = AppError;

    fn try_from(row: CustomerUserRow) -> Result<Self, Self::Error> {
        let name = row.role_name.parse().map_err(|_| {
            AppError::database(format!("Unknown customer role '{}' in database", row.role_name))
        })?;
        Ok(CustomerUser {
            id: row.id,
            email: row.email,
            name: row.name,
            password_hash: row.password_hash,
            status: row.status,
            role: CustomerRole {
                id: row.role_id,
                name,
                description: row.role_description,
            },
            organization: Organization {
                id: row.org_id,
                name: row.org_name,
                company_name: row.org_company_name,
                plan: row.org_plan,
                status: row.org_status,
                created_at: row.org_created_at,
                updated_at: row.org_updated_at,
                deleted_at: row.org_deleted_at,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        })
    }
}

/// Repository for customer users.
#[derive(Debug, Clone)]
pub struct CustomerUserRepository {
    pool: PgPool,
}

impl CustomerUserRepository {
    /// Create a new customer user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a visible customer user by email (case-insensitive).
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<CustomerUser>> {
        let sql = format!("{CUSTOMER_USER_SELECT} WHERE LOWER(u.email) = LOWER($1) AND {VISIBLE}");
        sqlx::query_as::<_, CustomerUserRow>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find customer user by email", e)
            })?
            .map(CustomerUser::try_from)
            .transpose()
    }

    /// Find a visible customer user by id.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<CustomerUser>> {
        let sql = format!("{CUSTOMER_USER_SELECT} WHERE u.id = $1 AND {VISIBLE}");
        sqlx::query_as::<_, CustomerUserRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find customer user by id", e)
            })?
            .map(CustomerUser::try_from)
            .transpose()
    }

    /// Whether any customer user row, deleted or not, holds this email.
    pub async fn email_exists(&self, email: &str) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM customer_users WHERE LOWER(email) = LOWER($1))",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to check customer email", e)
        })
    }

    /// List the visible users of an organization.
    pub async fn find_by_organization(&self, organization_id: Uuid) -> AppResult<Vec<CustomerUser>> {
        let sql = format!(
            "{CUSTOMER_USER_SELECT} WHERE u.organization_id = $1 AND {VISIBLE} ORDER BY u.created_at"
        );
        sqlx::query_as::<_, CustomerUserRow>(&sql)
            .bind(organization_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list customer users", e)
            })?
            .into_iter()
            .map(CustomerUser::try_from)
            .collect()
    }

    /// Create a customer user.
    pub async fn create(&self, data: &CreateCustomerUser) -> AppResult<CustomerUser> {
        let id: Uuid = sqlx::query_scalar(
            "INSERT INTO customer_users (organization_id, role_id, email, name, password_hash, status) \
             SELECT $1, r.id, $2, $3, $4, $5 FROM customer_roles r WHERE r.name = $6 \
             RETURNING id",
        )
        .bind(data.organization_id)
        .bind(&data.email)
        .bind(&data.name)
        .bind(&data.password_hash)
        .bind(data.status)
        .bind(data.role.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("customer_users_email_key") =>
            {
                AppError::conflict(format!("Email '{}' is already in use", data.email))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create customer user", e),
        })?
        .ok_or_else(|| {
            AppError::database(format!("Customer role '{}' is not seeded", data.role))
        })?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::internal("Created customer user vanished"))
    }

    /// Change a customer user's status.
    pub async fn update_status(&self, id: Uuid, status: AccountStatus) -> AppResult<CustomerUser> {
        let updated = sqlx::query(
            "UPDATE customer_users SET status = $2, updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(status)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update customer user status", e)
        })?;

        if updated.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Customer user {id} not found")));
        }
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Customer user {id} not found")))
    }
}
