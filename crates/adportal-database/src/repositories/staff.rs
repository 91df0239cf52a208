//! Staff repository implementation.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use adportal_core::error::{AppError, ErrorKind};
use adportal_core::result::AppResult;
use adportal_entity::AccountStatus;
use adportal_entity::staff::{CreateStaff, StaffPrincipal, StaffRole};

const STAFF_SELECT: &str = "SELECT s.id, s.staff_id, s.email, s.name, s.password_hash, s.status, \
            s.created_at, s.updated_at, s.deleted_at, \
            r.id AS role_id, r.name AS role_name, r.description AS role_description \
     FROM staff s JOIN staff_roles r ON r.id = s.role_id";

/// Flat row of a staff member joined with its role.
#[derive(Debug, FromRow)]
struct StaffRow {
    id: Uuid,
    staff_id: String,
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
}

impl TryFrom<StaffRow> for StaffPrincipal {
    type Error = AppError;

    fn try_from(row: StaffRow) -> Result<Self, Self::Error> {
        let name = row.role_name.parse().map_err(|_| {
            AppError::database(format!("Unknown staff role '{}' in database", row.role_name))
        })?;
        Ok(StaffPrincipal {
            id: row.id,
            staff_id: row.staff_id,
            email: row.email,
            name: row.name,
            password_hash: row.password_hash,
            status: row.status,
            role: StaffRole {
                id: row.role_id,
                name,
                description: row.role_description,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        })
    }
}

/// Repository for staff principals.
#[derive(Debug, Clone)]
pub struct StaffRepository {
    pool: PgPool,
}

impl StaffRepository {
    /// Create a new staff repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a non-deleted staff member by email (case-insensitive).
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<StaffPrincipal>> {
        let sql = format!("{STAFF_SELECT} WHERE LOWER(s.email) = LOWER($1) AND s.deleted_at IS NULL");
        sqlx::query_as::<_, StaffRow>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find staff by email", e)
            })?
            .map(StaffPrincipal::try_from)
            .transpose()
    }

    /// Find a non-deleted staff member by id.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<StaffPrincipal>> {
        let sql = format!("{STAFF_SELECT} WHERE s.id = $1 AND s.deleted_at IS NULL");
        sqlx::query_as::<_, StaffRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find staff by id", e))?
            .map(StaffPrincipal::try_from)
            .transpose()
    }

    /// List non-deleted staff members ordered by staff number.
    pub async fn find_all(&self) -> AppResult<Vec<StaffPrincipal>> {
        let sql = format!("{STAFF_SELECT} WHERE s.deleted_at IS NULL ORDER BY s.staff_id");
        sqlx::query_as::<_, StaffRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list staff", e))?
            .into_iter()
            .map(StaffPrincipal::try_from)
            .collect()
    }

    /// Create a staff member.
    pub async fn create(&self, data: &CreateStaff) -> AppResult<StaffPrincipal> {
        let id: Uuid = sqlx::query_scalar(
            "INSERT INTO staff (staff_id, email, name, password_hash, status, role_id) \
             SELECT $1, $2, $3, $4, $5, r.id FROM staff_roles r WHERE r.name = $6 \
             RETURNING id",
        )
        .bind(&data.staff_id)
        .bind(&data.email)
        .bind(&data.name)
        .bind(&data.password_hash)
        .bind(data.status)
        .bind(data.role.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("staff_email_key") => {
                AppError::conflict(format!("Email '{}' is already in use", data.email))
            }
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("staff_staff_id_key") =>
            {
                AppError::conflict(format!("Staff id '{}' already exists", data.staff_id))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create staff", e),
        })?
        .ok_or_else(|| AppError::database(format!("Staff role '{}' is not seeded", data.role)))?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::internal("Created staff record vanished"))
    }

    /// Change a staff member's status.
    pub async fn update_status(&self, id: Uuid, status: AccountStatus) -> AppResult<StaffPrincipal> {
        let updated = sqlx::query(
            "UPDATE staff SET status = $2, updated_at = NOW() \
             WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .bind(status)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update staff status", e)
        })?;

        if updated.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Staff {id} not found")));
        }
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Staff {id} not found")))
    }
}
