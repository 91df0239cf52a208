//! Listing and connecting ad accounts within the caller's organization.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::info;
use validator::{Validate, ValidationErrors};

use adportal_core::error::AppError;
use adportal_database::CredentialStore;
use adportal_entity::PrincipalKind;
use adportal_entity::ad_account::{AdPlatform, ConnectedAdAccount, CreateAdAccount};

use crate::context::RequestContext;
use crate::validation::into_result;

/// Customer request to connect a platform account.
#[derive(Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ConnectAdAccountRequest {
    /// Platform.
    pub platform: AdPlatform,
    /// The platform's account identifier.
    #[validate(length(min = 1, max = 255, message = "must be 1 to 255 characters"))]
    pub account_id: String,
    /// Display name.
    #[validate(length(min = 1, max = 255, message = "must be 1 to 255 characters"))]
    pub account_name: String,
    /// Opaque access token obtained from the platform.
    #[validate(length(min = 1, message = "is required"))]
    pub access_token: String,
    /// Opaque refresh token, if any.
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Access token expiry, if known.
    #[serde(default)]
    pub token_expires_at: Option<DateTime<Utc>>,
}

impl std::fmt::Debug for ConnectAdAccountRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectAdAccountRequest")
            .field("platform", &self.platform)
            .field("account_id", &self.account_id)
            .field("account_name", &self.account_name)
            .finish_non_exhaustive()
    }
}

/// Ad accounts scoped to the caller's organization.
#[derive(Debug, Clone)]
pub struct AdAccountService {
    store: Arc<dyn CredentialStore>,
}

impl AdAccountService {
    /// Creates a new ad account service.
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    /// Lists the accounts of the caller's organization.
    pub async fn list(&self, ctx: &RequestContext) -> Result<Vec<ConnectedAdAccount>, AppError> {
        let organization_id = ctx.require_organization()?;
        self.store.list_ad_accounts(organization_id).await
    }

    /// Connects an account to the caller's organization.
    ///
    /// Only customer users whose role can edit may connect.
    pub async fn connect(
        &self,
        ctx: &RequestContext,
        request: &ConnectAdAccountRequest,
    ) -> Result<ConnectedAdAccount, AppError> {
        let organization_id = ctx.require_organization()?;
        let can_edit = ctx.kind == PrincipalKind::CustomerUser
            && ctx.organization_role.is_some_and(|role| role.can_edit());
        if !can_edit {
            return Err(AppError::authorization(
                "Your role cannot connect ad accounts",
            ));
        }

        into_result(request.validate().err().unwrap_or_else(ValidationErrors::new))?;

        let account = self
            .store
            .create_ad_account(&CreateAdAccount {
                organization_id,
                platform: request.platform,
                account_id: request.account_id.trim().to_string(),
                account_name: request.account_name.trim().to_string(),
                access_token: request.access_token.clone(),
                refresh_token: request.refresh_token.clone(),
                token_expires_at: request.token_expires_at,
            })
            .await?;

        info!(
            principal_id = %ctx.principal_id,
            organization_id = %organization_id,
            platform = %account.platform,
            "Ad account connected"
        );
        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use adportal_core::error::ErrorKind;

    use crate::testing::{customer_ctx, seeded, subcustomer_ctx};

    fn request(account_id: &str) -> ConnectAdAccountRequest {
        ConnectAdAccountRequest {
            platform: AdPlatform::GoogleAds,
            account_id: account_id.to_string(),
            account_name: "Acme Search".to_string(),
            access_token: "ya29.secret-token".to_string(),
            refresh_token: Some("1//refresh-secret".to_string()),
            token_expires_at: None,
        }
    }

    #[tokio::test]
    async fn test_owner_connects_and_members_list() {
        let seeded = seeded().await;
        let service = AdAccountService::new(Arc::clone(&seeded.shared));
        let owner = customer_ctx(&seeded.store, "john@acmecorp.com").await;

        let account = service.connect(&owner, &request("123-456-7890")).await.unwrap();
        assert_eq!(Some(account.organization_id), owner.organization_id);

        let editor = customer_ctx(&seeded.store, "jane@acmecorp.com").await;
        assert_eq!(service.list(&editor).await.unwrap().len(), 1);

        let sub = subcustomer_ctx(account.organization_id);
        assert_eq!(service.list(&sub).await.unwrap().len(), 1);

        let other = customer_ctx(&seeded.store, "alice@techstartup.com").await;
        assert!(service.list(&other).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_viewer_and_subcustomer_cannot_connect() {
        let seeded = seeded().await;
        let service = AdAccountService::new(Arc::clone(&seeded.shared));
        let viewer = customer_ctx(&seeded.store, "bob@acmecorp.com").await;
        let err = service.connect(&viewer, &request("1")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);

        let sub = subcustomer_ctx(viewer.organization_id.unwrap());
        let err = service.connect(&sub, &request("1")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);
    }

    #[tokio::test]
    async fn test_duplicate_account_conflicts() {
        let seeded = seeded().await;
        let service = AdAccountService::new(Arc::clone(&seeded.shared));
        let owner = customer_ctx(&seeded.store, "john@acmecorp.com").await;
        service.connect(&owner, &request("42")).await.unwrap();
        let err = service.connect(&owner, &request("42")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_tokens_never_leave_the_service_serialized() {
        let seeded = seeded().await;
        let service = AdAccountService::new(Arc::clone(&seeded.shared));
        let owner = customer_ctx(&seeded.store, "john@acmecorp.com").await;
        service.connect(&owner, &request("7")).await.unwrap();

        let json = serde_json::to_string(&service.list(&owner).await.unwrap()).unwrap();
        assert!(!json.contains("secret"));
        assert!(json.contains("google_ads"));
    }

    #[tokio::test]
    async fn test_missing_token_is_a_validation_error() {
        let seeded = seeded().await;
        let service = AdAccountService::new(Arc::clone(&seeded.shared));
        let owner = customer_ctx(&seeded.store, "john@acmecorp.com").await;
        let mut bad = request("8");
        bad.access_token = String::new();
        let err = service.connect(&owner, &bad).await.unwrap_err();
        assert_eq!(err.details, vec!["accessToken: is required".to_string()]);
    }
}
