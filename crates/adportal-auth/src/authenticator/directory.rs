//! Per-kind record lookup used by the generic authenticator.

use std::sync::Arc;

use async_trait::async_trait;

use adportal_core::result::AppResult;
use adportal_database::CredentialStore;
use adportal_entity::Credentialed;
use adportal_entity::customer::CustomerUser;
use adportal_entity::staff::StaffPrincipal;
use adportal_entity::subcustomer::SubCustomer;

/// Looks up credentialed records of one principal kind.
///
/// Implementations must never return a soft-deleted record, and must
/// return organization-scoped records with their organization resolved.
#[async_trait]
pub trait PrincipalDirectory: Send + Sync {
    /// The record type this directory yields.
    type Record: Credentialed + Send + 'static;

    /// Find a record by (already normalized) email, whatever its status.
    async fn lookup_by_email(&self, email: &str) -> AppResult<Option<Self::Record>>;
}

/// Staff lookup.
#[derive(Debug, Clone)]
pub struct StaffDirectory {
    store: Arc<dyn CredentialStore>,
}

impl StaffDirectory {
    /// Wrap a store.
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl PrincipalDirectory for StaffDirectory {
    type Record = StaffPrincipal;

    async fn lookup_by_email(&self, email: &str) -> AppResult<Option<StaffPrincipal>> {
        self.store.find_staff_by_email(email).await
    }
}

/// Customer user lookup.
#[derive(Debug, Clone)]
pub struct CustomerUserDirectory {
    store: Arc<dyn CredentialStore>,
}

impl CustomerUserDirectory {
    /// Wrap a store.
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl PrincipalDirectory for CustomerUserDirectory {
    type Record = CustomerUser;

    async fn lookup_by_email(&self, email: &str) -> AppResult<Option<CustomerUser>> {
        self.store.find_customer_user_by_email(email).await
    }
}

/// Sub-customer lookup.
#[derive(Debug, Clone)]
pub struct SubCustomerDirectory {
    store: Arc<dyn CredentialStore>,
}

impl SubCustomerDirectory {
    /// Wrap a store.
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl PrincipalDirectory for SubCustomerDirectory {
    type Record = SubCustomer;

    async fn lookup_by_email(&self, email: &str) -> AppResult<Option<SubCustomer>> {
        self.store.find_subcustomer_by_email(email).await
    }
}
