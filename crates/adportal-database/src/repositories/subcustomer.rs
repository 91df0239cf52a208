//! Sub-customer repository implementation.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use adportal_core::error::{AppError, ErrorKind};
use adportal_core::result::AppResult;
use adportal_entity::AccountStatus;
use adportal_entity::organization::Organization;
use adportal_entity::subcustomer::{CreateSubCustomer, SubCustomer};

const SUBCUSTOMER_SELECT: &str = "SELECT c.id, c.email, c.name, c.password_hash, c.status, \
            c.created_at, c.updated_at, c.deleted_at, \
            o.id AS org_id, o.name AS org_name, o.company_name AS org_company_name, \
            o.plan AS org_plan, o.status AS org_status, o.created_at AS org_created_at, \
            o.updated_at AS org_updated_at, o.deleted_at AS org_deleted_at \
     FROM sub_customers c \
     JOIN organizations o ON o.id = c.organization_id";

/// Flat row of a sub-customer joined with its organization.
#[derive(Debug, FromRow)]
struct SubCustomerRow {
    id: Uuid,
    email: String,
    name: String,
    password_hash: String,
    status: AccountStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
    org_id: Uuid,
    org_name: String,
    org_company_name: String,
    org_plan: String,
    org_status: AccountStatus,
    org_created_at: DateTime<Utc>,
    org_updated_at: DateTime<Utc>,
    org_deleted_at: Option<DateTime<Utc>>,
}

impl From<SubCustomerRow> for SubCustomer {
    fn from(row: SubCustomerRow) -> Self {
        SubCustomer {
            id: row.id,
            email: row.email,
            name: row.name,
            password_hash: row.password_hash,
            status: row.status,
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
        }
    }
}

/// Repository for sub-customers.
#[derive(Debug, Clone)]
pub struct SubCustomerRepository {
    pool: PgPool,
}

impl SubCustomerRepository {
    /// Create a new sub-customer repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a visible sub-customer by email (case-insensitive).
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<SubCustomer>> {
        let sql = format!(
            "{SUBCUSTOMER_SELECT} WHERE LOWER(c.email) = LOWER($1) \
             AND c.deleted_at IS NULL AND o.deleted_at IS NULL"
        );
        sqlx::query_as::<_, SubCustomerRow>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map(|row| row.map(SubCustomer::from))
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find sub-customer by email", e)
            })
    }

    /// Find a visible sub-customer by id.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<SubCustomer>> {
        let sql = format!(
            "{SUBCUSTOMER_SELECT} WHERE c.id = $1 AND c.deleted_at IS NULL AND o.deleted_at IS NULL"
        );
        sqlx::query_as::<_, SubCustomerRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map(|row| row.map(SubCustomer::from))
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find sub-customer by id", e)
            })
    }

    /// Create a sub-customer.
    pub async fn create(&self, data: &CreateSubCustomer) -> AppResult<SubCustomer> {
        let id: Uuid = sqlx::query_scalar(
            "INSERT INTO sub_customers (organization_id, email, name, password_hash, status) \
             VALUES ($1, $2, $3, $4, $5) RETURNING id",
        )
        .bind(data.organization_id)
        .bind(&data.email)
        .bind(&data.name)
        .bind(&data.password_hash)
        .bind(data.status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("sub_customers_email_key") =>
            {
                AppError::conflict(format!("Email '{}' is already in use", data.email))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create sub-customer", e),
        })?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::internal("Created sub-customer vanished"))
    }

    /// Change a sub-customer's status.
    pub async fn update_status(&self, id: Uuid, status: AccountStatus) -> AppResult<SubCustomer> {
        let updated = sqlx::query(
            "UPDATE sub_customers SET status = $2, updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(status)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update sub-customer status", e)
        })?;

        if updated.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Sub-customer {id} not found")));
        }
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Sub-customer {id} not found")))
    }
}
