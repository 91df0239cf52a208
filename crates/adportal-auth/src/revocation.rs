//! Revocation list for already-issued session tokens.
//!
//! Operators who suspend an organization or a principal record a
//! revocation instant here. The route guard rejects any token issued at or
//! before that instant, so suspensions take effect without waiting for
//! token expiry and without a database round-trip per request.

use std::time::Duration;

use chrono::Utc;
use moka::future::Cache;
use tracing::info;
use uuid::Uuid;

use crate::jwt::TokenClaims;
use crate::jwt::decoder::EXPIRY_LEEWAY_SECONDS;

const MAX_ENTRIES: u64 = 100_000;

/// In-process revocation list keyed by organization and principal id.
#[derive(Debug, Clone)]
pub struct RevocationList {
    /// Key → revocation timestamp (seconds since epoch).
    entries: Cache<String, i64>,
    retention: Duration,
}

fn organization_key(id: Uuid) -> String {
    format!("org:{id}")
}

fn principal_key(id: Uuid) -> String {
    format!("principal:{id}")
}

impl RevocationList {
    /// Create a list whose entries outlive any token issued before them,
    /// including the decoder's expiry leeway.
    pub fn new(token_ttl: Duration) -> Self {
        let retention = token_ttl + Duration::from_secs(EXPIRY_LEEWAY_SECONDS);
        let entries = Cache::builder()
            .max_capacity(MAX_ENTRIES)
            .time_to_live(retention)
            .build();
        Self { entries, retention }
    }

    /// How long a revocation is kept.
    pub fn retention(&self) -> Duration {
        self.retention
    }

    /// Revoke every token of every member of an organization.
    pub async fn revoke_organization(&self, id: Uuid) {
        self.entries
            .insert(organization_key(id), Utc::now().timestamp())
            .await;
        info!(organization_id = %id, "Organization sessions revoked");
    }

    /// Revoke every token of one principal.
    pub async fn revoke_principal(&self, id: Uuid) {
        self.entries
            .insert(principal_key(id), Utc::now().timestamp())
            .await;
        info!(principal_id = %id, "Principal sessions revoked");
    }

    /// Stop revoking an organization's tokens.
    pub async fn clear_organization(&self, id: Uuid) {
        self.entries.invalidate(&organization_key(id)).await;
    }

    /// Stop revoking a principal's tokens.
    pub async fn clear_principal(&self, id: Uuid) {
        self.entries.invalidate(&principal_key(id)).await;
    }

    /// Whether a token was issued at or before a revocation covering it.
    pub async fn is_revoked(&self, claims: &TokenClaims) -> bool {
        let covered = |revoked_at: Option<i64>| revoked_at.is_some_and(|at| claims.iat <= at);

        if covered(self.entries.get(&principal_key(claims.session.principal_id)).await) {
            return true;
        }
        match claims.session.organization_id {
            Some(org_id) => covered(self.entries.get(&organization_key(org_id)).await),
            None => false,
        }
    }
}
