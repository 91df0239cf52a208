//! PostgreSQL repositories and the [`PgStore`] that exposes them through
//! the store traits.

pub mod ad_account;
pub mod customer_user;
pub mod organization;
pub mod staff;
pub mod subcustomer;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use adportal_core::error::AppError;
use adportal_core::result::AppResult;
use adportal_entity::AccountStatus;
use adportal_entity::ad_account::{ConnectedAdAccount, CreateAdAccount};
use adportal_entity::customer::{CreateCustomerUser, CustomerUser, NewOwner};
use adportal_entity::organization::{CreateOrganization, Organization, UpdateOrganization};
use adportal_entity::staff::{CreateStaff, StaffPrincipal};
use adportal_entity::subcustomer::{CreateSubCustomer, SubCustomer};

use crate::store::{
    AdAccountStore, CustomerUserStore, OrganizationStore, StaffStore, SubCustomerStore,
};

use self::ad_account::AdAccountRepository;
use self::customer_user::CustomerUserRepository;
use self::organization::OrganizationRepository;
use self::staff::StaffRepository;
use self::subcustomer::SubCustomerRepository;

/// PostgreSQL-backed credential store.
#[derive(Debug, Clone)]
pub struct PgStore {
    /// Staff repository.
    pub staff: StaffRepository,
    /// Organization repository.
    pub organizations: OrganizationRepository,
    /// Customer user repository.
    pub customer_users: CustomerUserRepository,
    /// Sub-customer repository.
    pub sub_customers: SubCustomerRepository,
    /// Connected ad account repository.
    pub ad_accounts: AdAccountRepository,
}

impl PgStore {
    /// Build every repository over one pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            staff: StaffRepository::new(pool.clone()),
            organizations: OrganizationRepository::new(pool.clone()),
            customer_users: CustomerUserRepository::new(pool.clone()),
            sub_customers: SubCustomerRepository::new(pool.clone()),
            ad_accounts: AdAccountRepository::new(pool),
        }
    }
}

#[async_trait]
impl StaffStore for PgStore {
    async fn find_staff_by_email(&self, email: &str) -> AppResult<Option<StaffPrincipal>> {
        self.staff.find_by_email(email).await
    }

    async fn find_staff_by_id(&self, id: Uuid) -> AppResult<Option<StaffPrincipal>> {
        self.staff.find_by_id(id).await
    }

    async fn list_staff(&self) -> AppResult<Vec<StaffPrincipal>> {
        self.staff.find_all().await
    }

    async fn create_staff(&self, data: &CreateStaff) -> AppResult<StaffPrincipal> {
        self.staff.create(data).await
    }

    async fn set_staff_status(
        &self,
        id: Uuid,
        status: AccountStatus,
    ) -> AppResult<StaffPrincipal> {
        self.staff.update_status(id, status).await
    }
}

#[async_trait]
impl OrganizationStore for PgStore {
    async fn find_organization(&self, id: Uuid) -> AppResult<Option<Organization>> {
        self.organizations.find_by_id(id).await
    }

    async fn list_organizations(&self) -> AppResult<Vec<Organization>> {
        self.organizations.find_all().await
    }

    async fn create_organization_with_owner(
        &self,
        organization: &CreateOrganization,
        owner: &NewOwner,
    ) -> AppResult<(Organization, CustomerUser)> {
        let (organization, owner_id) = self
            .organizations
            .create_with_owner(organization, owner)
            .await?;
        let owner = self
            .customer_users
            .find_by_id(owner_id)
            .await?
            .ok_or_else(|| AppError::internal("Created owner vanished"))?;
        Ok((organization, owner))
    }

    async fn update_organization(
        &self,
        id: Uuid,
        data: &UpdateOrganization,
    ) -> AppResult<Organization> {
        self.organizations.update(id, data).await
    }

    async fn set_organization_status(
        &self,
        id: Uuid,
        status: AccountStatus,
    ) -> AppResult<Organization> {
        self.organizations.update_status(id, status).await
    }

    async fn soft_delete_organization(&self, id: Uuid) -> AppResult<()> {
        self.organizations.soft_delete(id).await
    }
}

#[async_trait]
impl CustomerUserStore for PgStore {
    async fn find_customer_user_by_email(&self, email: &str) -> AppResult<Option<CustomerUser>> {
        self.customer_users.find_by_email(email).await
    }

    async fn find_customer_user_by_id(&self, id: Uuid) -> AppResult<Option<CustomerUser>> {
        self.customer_users.find_by_id(id).await
    }

    async fn customer_email_exists(&self, email: &str) -> AppResult<bool> {
        self.customer_users.email_exists(email).await
    }

    async fn list_customer_users(&self, organization_id: Uuid) -> AppResult<Vec<CustomerUser>> {
        self.customer_users.find_by_organization(organization_id).await
    }

    async fn create_customer_user(&self, data: &CreateCustomerUser) -> AppResult<CustomerUser> {
        self.customer_users.create(data).await
    }

    async fn set_customer_user_status(
        &self,
        id: Uuid,
        status: AccountStatus,
    ) -> AppResult<CustomerUser> {
        self.customer_users.update_status(id, status).await
    }
}

#[async_trait]
impl SubCustomerStore for PgStore {
    async fn find_subcustomer_by_email(&self, email: &str) -> AppResult<Option<SubCustomer>> {
        self.sub_customers.find_by_email(email).await
    }

    async fn find_subcustomer_by_id(&self, id: Uuid) -> AppResult<Option<SubCustomer>> {
        self.sub_customers.find_by_id(id).await
    }

    async fn create_subcustomer(&self, data: &CreateSubCustomer) -> AppResult<SubCustomer> {
        self.sub_customers.create(data).await
    }

    async fn set_subcustomer_status(
        &self,
        id: Uuid,
        status: AccountStatus,
    ) -> AppResult<SubCustomer> {
        self.sub_customers.update_status(id, status).await
    }
}

#[async_trait]
impl AdAccountStore for PgStore {
    async fn list_ad_accounts(&self, organization_id: Uuid) -> AppResult<Vec<ConnectedAdAccount>> {
        self.ad_accounts.find_by_organization(organization_id).await
    }

    async fn create_ad_account(&self, data: &CreateAdAccount) -> AppResult<ConnectedAdAccount> {
        self.ad_accounts.create(data).await
    }
}
