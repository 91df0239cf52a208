//! Email/password authentication.
//!
//! One decision procedure serves all three principal kinds:
//!
//! 1. look the record up by normalized email (status ignored, soft-deleted
//!    records invisible)
//! 2. verify the password, before any status is looked at
//! 3. gate on the owning organization's status, then on the record's own
//!
//! Expected rejections are values, never errors. `Err` means the store or
//! the hashing pool failed.

pub mod directory;
pub mod result;

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, info};

use adportal_core::result::AppResult;
use adportal_database::CredentialStore;
use adportal_entity::{Credentialed, PrincipalKind};

use crate::password::PasswordHasher;

pub use directory::{CustomerUserDirectory, PrincipalDirectory, StaffDirectory, SubCustomerDirectory};
pub use result::{AuthResult, RejectionReason};

/// A raw sign-in submission.
#[derive(Clone, Deserialize)]
pub struct Credentials {
    /// Email as typed.
    #[serde(default)]
    pub email: String,
    /// Plaintext password.
    #[serde(default)]
    pub password: String,
}

impl Credentials {
    /// Build credentials from borrowed parts.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Normalize an email for lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Evaluate status gates for a record whose password already matched.
///
/// The organization gate overrides the record's own status.
pub fn evaluate_status_gates<R: Credentialed>(record: &R) -> Option<RejectionReason> {
    if let Some(organization) = record.organization() {
        if let Some(reason) = RejectionReason::for_organization(organization.status) {
            return Some(reason);
        }
    }
    RejectionReason::for_account(record.status())
}

/// Authenticator for one principal kind.
#[derive(Debug, Clone)]
pub struct Authenticator<D> {
    directory: D,
    hasher: Arc<PasswordHasher>,
}

impl<D: PrincipalDirectory> Authenticator<D> {
    /// Create an authenticator over a directory.
    pub fn new(directory: D, hasher: Arc<PasswordHasher>) -> Self {
        Self { directory, hasher }
    }

    /// Authenticate one submission.
    pub async fn authenticate(&self, credentials: &Credentials) -> AppResult<AuthResult> {
        let kind = D::Record::KIND;
        let email = normalize_email(&credentials.email);
        if email.is_empty() || credentials.password.is_empty() {
            return Ok(AuthResult::rejected(RejectionReason::InvalidCredentials));
        }

        let Some(record) = self.directory.lookup_by_email(&email).await? else {
            self.hasher.verify_dummy(credentials.password.clone()).await?;
            debug!(principal_kind = %kind, email = %email, "No record for email");
            return Ok(AuthResult::rejected(RejectionReason::InvalidCredentials));
        };

        let matches = self
            .hasher
            .verify_password_blocking(
                credentials.password.clone(),
                record.password_hash().to_string(),
            )
            .await?;
        if !matches {
            return Ok(AuthResult::rejected(RejectionReason::InvalidCredentials));
        }

        if let Some(reason) = evaluate_status_gates(&record) {
            info!(
                principal_kind = %kind,
                principal_id = %record.id(),
                organization_id = ?record.organization().map(|o| o.id),
                reason = %reason,
                "Sign-in blocked by status gate"
            );
            return Ok(AuthResult::rejected(reason));
        }

        Ok(AuthResult::Success(record.into_principal()))
    }
}

/// The three per-kind authenticators behind one entry point.
#[derive(Debug, Clone)]
pub struct CredentialAuthenticator {
    staff: Authenticator<StaffDirectory>,
    customer_users: Authenticator<CustomerUserDirectory>,
    sub_customers: Authenticator<SubCustomerDirectory>,
}

impl CredentialAuthenticator {
    /// Build all three authenticators over one store.
    pub fn new(store: Arc<dyn CredentialStore>, hasher: Arc<PasswordHasher>) -> Self {
        Self {
            staff: Authenticator::new(StaffDirectory::new(Arc::clone(&store)), Arc::clone(&hasher)),
            customer_users: Authenticator::new(
                CustomerUserDirectory::new(Arc::clone(&store)),
                Arc::clone(&hasher),
            ),
            sub_customers: Authenticator::new(SubCustomerDirectory::new(store), hasher),
        }
    }

    /// Authenticate a submission against the given principal kind.
    pub async fn authenticate(
        &self,
        kind: PrincipalKind,
        credentials: &Credentials,
    ) -> AppResult<AuthResult> {
        match kind {
            PrincipalKind::Staff => self.staff.authenticate(credentials).await,
            PrincipalKind::CustomerUser => self.customer_users.authenticate(credentials).await,
            PrincipalKind::SubCustomer => self.sub_customers.authenticate(credentials).await,
        }
    }
}
