//! Connected ad account repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use adportal_core::error::{AppError, ErrorKind};
use adportal_core::result::AppResult;
use adportal_entity::ad_account::{ConnectedAdAccount, CreateAdAccount};

/// Repository for connected ad accounts.
#[derive(Debug, Clone)]
pub struct AdAccountRepository {
    pool: PgPool,
}

impl AdAccountRepository {
    /// Create a new ad account repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List an organization's connected accounts.
    pub async fn find_by_organization(
        &self,
        organization_id: Uuid,
    ) -> AppResult<Vec<ConnectedAdAccount>> {
        sqlx::query_as::<_, ConnectedAdAccount>(
            "SELECT * FROM connected_ad_accounts WHERE organization_id = $1 \
             ORDER BY created_at DESC",
        )
        .bind(organization_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list ad accounts", e))
    }

    /// Connect an ad account.
    pub async fn create(&self, data: &CreateAdAccount) -> AppResult<ConnectedAdAccount> {
        sqlx::query_as::<_, ConnectedAdAccount>(
            "INSERT INTO connected_ad_accounts \
                 (organization_id, platform, account_id, account_name, access_token, \
                  refresh_token, token_expires_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(data.organization_id)
        .bind(data.platform)
        .bind(&data.account_id)
        .bind(&data.account_name)
        .bind(&data.access_token)
        .bind(&data.refresh_token)
        .bind(data.token_expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("connected_ad_accounts_account_key") =>
            {
                AppError::conflict(format!(
                    "{} account '{}' is already connected",
                    data.platform, data.account_id
                ))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to connect ad account", e),
        })
    }
}
