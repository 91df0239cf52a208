//! Credential store traits.
//!
//! Every `find_*_by_email` lookup is case-insensitive, ignores status and
//! never returns a soft-deleted record. Organization-scoped principals are
//! returned with their organization resolved; a principal whose
//! organization is soft-deleted is treated as not found.

use std::fmt::Debug;

use async_trait::async_trait;
use uuid::Uuid;

use adportal_core::AppResult;
use adportal_entity::ad_account::{ConnectedAdAccount, CreateAdAccount};
use adportal_entity::customer::{CreateCustomerUser, CustomerUser, NewOwner};
use adportal_entity::organization::{CreateOrganization, Organization, UpdateOrganization};
use adportal_entity::staff::{CreateStaff, StaffPrincipal};
use adportal_entity::subcustomer::{CreateSubCustomer, SubCustomer};
use adportal_entity::AccountStatus;

/// Platform staff records.
#[async_trait]
pub trait StaffStore: Send + Sync + Debug {
    /// Find a non-deleted staff member by email.
    async fn find_staff_by_email(&self, email: &str) -> AppResult<Option<StaffPrincipal>>;

    /// Find a non-deleted staff member by id.
    async fn find_staff_by_id(&self, id: Uuid) -> AppResult<Option<StaffPrincipal>>;

    /// List non-deleted staff members.
    async fn list_staff(&self) -> AppResult<Vec<StaffPrincipal>>;

    /// Create a staff member. Fails with `Conflict` on a duplicate email or staff number.
    async fn create_staff(&self, data: &CreateStaff) -> AppResult<StaffPrincipal>;

    /// Change a staff member's status.
    async fn set_staff_status(&self, id: Uuid, status: AccountStatus)
    -> AppResult<StaffPrincipal>;
}

/// Customer organizations.
#[async_trait]
pub trait OrganizationStore: Send + Sync + Debug {
    /// Find a non-deleted organization by id.
    async fn find_organization(&self, id: Uuid) -> AppResult<Option<Organization>>;

    /// List non-deleted organizations, newest first.
    async fn list_organizations(&self) -> AppResult<Vec<Organization>>;

    /// Create an organization and its initial `Owner` user atomically.
    ///
    /// Either both records exist afterwards or neither does.
    async fn create_organization_with_owner(
        &self,
        organization: &CreateOrganization,
        owner: &NewOwner,
    ) -> AppResult<(Organization, CustomerUser)>;

    /// Update an organization's descriptive fields.
    async fn update_organization(
        &self,
        id: Uuid,
        data: &UpdateOrganization,
    ) -> AppResult<Organization>;

    /// Change an organization's status.
    async fn set_organization_status(
        &self,
        id: Uuid,
        status: AccountStatus,
    ) -> AppResult<Organization>;

    /// Soft-delete an organization.
    async fn soft_delete_organization(&self, id: Uuid) -> AppResult<()>;
}

/// Customer users.
#[async_trait]
pub trait CustomerUserStore: Send + Sync + Debug {
    /// Find a non-deleted customer user of a non-deleted organization by email.
    async fn find_customer_user_by_email(&self, email: &str) -> AppResult<Option<CustomerUser>>;

    /// Find a non-deleted customer user of a non-deleted organization by id.
    async fn find_customer_user_by_id(&self, id: Uuid) -> AppResult<Option<CustomerUser>>;

    /// Whether any customer user record, including soft-deleted ones, holds this email.
    async fn customer_email_exists(&self, email: &str) -> AppResult<bool>;

    /// List the non-deleted users of an organization.
    async fn list_customer_users(&self, organization_id: Uuid) -> AppResult<Vec<CustomerUser>>;

    /// Create a customer user. Fails with `Conflict` on a duplicate email.
    async fn create_customer_user(&self, data: &CreateCustomerUser) -> AppResult<CustomerUser>;

    /// Change a customer user's status.
    async fn set_customer_user_status(
        &self,
        id: Uuid,
        status: AccountStatus,
    ) -> AppResult<CustomerUser>;
}

/// Sub-customers.
#[async_trait]
pub trait SubCustomerStore: Send + Sync + Debug {
    /// Find a non-deleted sub-customer of a non-deleted organization by email.
    async fn find_subcustomer_by_email(&self, email: &str) -> AppResult<Option<SubCustomer>>;

    /// Find a non-deleted sub-customer of a non-deleted organization by id.
    async fn find_subcustomer_by_id(&self, id: Uuid) -> AppResult<Option<SubCustomer>>;

    /// Create a sub-customer. Fails with `Conflict` on a duplicate email.
    async fn create_subcustomer(&self, data: &CreateSubCustomer) -> AppResult<SubCustomer>;

    /// Change a sub-customer's status.
    async fn set_subcustomer_status(
        &self,
        id: Uuid,
        status: AccountStatus,
    ) -> AppResult<SubCustomer>;
}

/// Connected advertising accounts.
#[async_trait]
pub trait AdAccountStore: Send + Sync + Debug {
    /// List an organization's connected accounts.
    async fn list_ad_accounts(&self, organization_id: Uuid) -> AppResult<Vec<ConnectedAdAccount>>;

    /// Connect an account. Fails with `Conflict` if the organization already
    /// connected the same platform account.
    async fn create_ad_account(&self, data: &CreateAdAccount) -> AppResult<ConnectedAdAccount>;
}

/// Every store the application needs, behind one object.
pub trait CredentialStore:
    StaffStore + OrganizationStore + CustomerUserStore + SubCustomerStore + AdAccountStore
{
}

impl<T> CredentialStore for T where
    T: StaffStore + OrganizationStore + CustomerUserStore + SubCustomerStore + AdAccountStore
{
}
