//! Connected ad account model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::platform::AdPlatform;

/// An advertising account an organization has connected.
///
/// Platform tokens are stored opaquely and are never serialized.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ConnectedAdAccount {
    /// Unique identifier.
    pub id: Uuid,
    /// Owning organization.
    pub organization_id: Uuid,
    /// Platform the account lives on.
    pub platform: AdPlatform,
    /// The platform's own account identifier.
    pub account_id: String,
    /// Human-readable account name.
    pub account_name: String,
    /// Platform access token.
    #[serde(skip_serializing, default)]
    pub access_token: String,
    /// Platform refresh token, if the platform issues one.
    #[serde(skip_serializing, default)]
    pub refresh_token: Option<String>,
    /// Access token expiry, if known.
    pub token_expires_at: Option<DateTime<Utc>>,
    /// Whether the account is active for sync.
    pub is_active: bool,
    /// When the account was connected.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to connect an ad account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAdAccount {
    /// Owning organization.
    pub organization_id: Uuid,
    /// Platform.
    pub platform: AdPlatform,
    /// Platform account identifier.
    pub account_id: String,
    /// Account name.
    pub account_name: String,
    /// Access token.
    pub access_token: String,
    /// Refresh token.
    pub refresh_token: Option<String>,
    /// Access token expiry.
    pub token_expires_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_never_serialized() {
        let account = ConnectedAdAccount {
            id: Uuid::new_v4(),
            organization_id: Uuid::new_v4(),
            platform: AdPlatform::Meta,
            account_id: "act_123".to_string(),
            account_name: "Main".to_string(),
            access_token: "EAAB-secret".to_string(),
            refresh_token: Some("refresh-secret".to_string()),
            token_expires_at: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_string(&account).unwrap();
        assert!(!json.contains("secret"));
        assert!(json.contains("\"platform\":\"meta\""));
    }
}
