//! In-memory credential store.
//!
//! Mirrors the PostgreSQL store's semantics (case-insensitive email
//! lookups, soft-delete visibility, unique keys, atomic provisioning) so
//! the authentication and service layers can run without a database.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use adportal_core::error::AppError;
use adportal_core::result::AppResult;
use adportal_entity::AccountStatus;
use adportal_entity::ad_account::{ConnectedAdAccount, CreateAdAccount};
use adportal_entity::customer::{
    CreateCustomerUser, CustomerRole, CustomerRoleName, CustomerUser, NewOwner,
};
use adportal_entity::organization::{CreateOrganization, Organization, UpdateOrganization};
use adportal_entity::staff::{CreateStaff, StaffPrincipal, StaffRole, StaffRoleName};
use adportal_entity::subcustomer::{CreateSubCustomer, SubCustomer};

use crate::store::{
    AdAccountStore, CustomerUserStore, OrganizationStore, StaffStore, SubCustomerStore,
};

#[derive(Debug, Clone)]
struct StaffRecord {
    id: Uuid,
    staff_id: String,
    email: String,
    name: String,
    password_hash: String,
    status: AccountStatus,
    role: StaffRoleName,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
struct CustomerUserRecord {
    id: Uuid,
    organization_id: Uuid,
    email: String,
    name: String,
    password_hash: String,
    status: AccountStatus,
    role: CustomerRoleName,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
struct SubCustomerRecord {
    id: Uuid,
    organization_id: Uuid,
    email: String,
    name: String,
    password_hash: String,
    status: AccountStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug)]
struct MemoryState {
    staff_roles: HashMap<StaffRoleName, StaffRole>,
    customer_roles: HashMap<CustomerRoleName, CustomerRole>,
    staff: HashMap<Uuid, StaffRecord>,
    organizations: HashMap<Uuid, Organization>,
    customer_users: HashMap<Uuid, CustomerUserRecord>,
    sub_customers: HashMap<Uuid, SubCustomerRecord>,
    ad_accounts: Vec<ConnectedAdAccount>,
}

impl MemoryState {
    fn new() -> Self {
        let staff_roles = [StaffRoleName::Administrator, StaffRoleName::SupportAgent]
            .into_iter()
            .map(|name| {
                let role = StaffRole {
                    id: Uuid::new_v4(),
                    name,
                    description: name.default_description().to_string(),
                };
                (name, role)
            })
            .collect();
        let customer_roles = [
            CustomerRoleName::Owner,
            CustomerRoleName::Editor,
            CustomerRoleName::Viewer,
        ]
        .into_iter()
        .map(|name| {
            let role = CustomerRole {
                id: Uuid::new_v4(),
                name,
                description: name.default_description().to_string(),
            };
            (name, role)
        })
        .collect();

        Self {
            staff_roles,
            customer_roles,
            staff: HashMap::new(),
            organizations: HashMap::new(),
            customer_users: HashMap::new(),
            sub_customers: HashMap::new(),
            ad_accounts: Vec::new(),
        }
    }

    fn visible_organization(&self, id: Uuid) -> Option<&Organization> {
        self.organizations.get(&id).filter(|o| !o.is_deleted())
    }

    fn resolve_staff(&self, record: &StaffRecord) -> AppResult<StaffPrincipal> {
        let role = self
            .staff_roles
            .get(&record.role)
            .cloned()
            .ok_or_else(|| AppError::internal(format!("Staff role '{}' missing", record.role)))?;
        Ok(StaffPrincipal {
            id: record.id,
            staff_id: record.staff_id.clone(),
            email: record.email.clone(),
            name: record.name.clone(),
            password_hash: record.password_hash.clone(),
            status: record.status,
            role,
            created_at: record.created_at,
            updated_at: record.updated_at,
            deleted_at: record.deleted_at,
        })
    }

    /// Resolve a customer user if both it and its organization are visible.
    fn resolve_customer_user(&self, record: &CustomerUserRecord) -> AppResult<Option<CustomerUser>> {
        if record.deleted_at.is_some() {
            return Ok(None);
        }
        let Some(organization) = self.visible_organization(record.organization_id) else {
            return Ok(None);
        };
        let role = self.customer_roles.get(&record.role).cloned().ok_or_else(|| {
            AppError::internal(format!("Customer role '{}' missing", record.role))
        })?;
        Ok(Some(CustomerUser {
            id: record.id,
            email: record.email.clone(),
            name: record.name.clone(),
            password_hash: record.password_hash.clone(),
            status: record.status,
            role,
            organization: organization.clone(),
            created_at: record.created_at,
            updated_at: record.updated_at,
            deleted_at: record.deleted_at,
        }))
    }

    fn resolve_subcustomer(&self, record: &SubCustomerRecord) -> Option<SubCustomer> {
        if record.deleted_at.is_some() {
            return None;
        }
        let organization = self.visible_organization(record.organization_id)?;
        Some(SubCustomer {
            id: record.id,
            email: record.email.clone(),
            name: record.name.clone(),
            password_hash: record.password_hash.clone(),
            status: record.status,
            organization: organization.clone(),
            created_at: record.created_at,
            updated_at: record.updated_at,
            deleted_at: record.deleted_at,
        })
    }

    fn customer_email_taken(&self, email: &str) -> bool {
        self.customer_users
            .values()
            .any(|u| same_email(&u.email, email))
    }
}

fn same_email(stored: &str, candidate: &str) -> bool {
    stored.to_lowercase() == candidate.to_lowercase()
}

/// In-memory credential store, cheap to clone.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    state: Arc<RwLock<MemoryState>>,
    unavailable: Arc<AtomicBool>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Create an empty store with the role reference rows in place.
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(MemoryState::new())),
            unavailable: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Make every subsequent call fail as if the backing store were unreachable.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> AppResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::service_unavailable("Credential store is unreachable"));
        }
        Ok(())
    }

    /// Soft-delete a staff member.
    pub async fn soft_delete_staff(&self, id: Uuid) -> AppResult<()> {
        self.check_available()?;
        let mut state = self.state.write().await;
        let record = state
            .staff
            .get_mut(&id)
            .filter(|r| r.deleted_at.is_none())
            .ok_or_else(|| AppError::not_found(format!("Staff {id} not found")))?;
        record.deleted_at = Some(Utc::now());
        Ok(())
    }

    /// Soft-delete a customer user.
    pub async fn soft_delete_customer_user(&self, id: Uuid) -> AppResult<()> {
        self.check_available()?;
        let mut state = self.state.write().await;
        let record = state
            .customer_users
            .get_mut(&id)
            .filter(|r| r.deleted_at.is_none())
            .ok_or_else(|| AppError::not_found(format!("Customer user {id} not found")))?;
        record.deleted_at = Some(Utc::now());
        Ok(())
    }

    /// Soft-delete a sub-customer.
    pub async fn soft_delete_subcustomer(&self, id: Uuid) -> AppResult<()> {
        self.check_available()?;
        let mut state = self.state.write().await;
        let record = state
            .sub_customers
            .get_mut(&id)
            .filter(|r| r.deleted_at.is_none())
            .ok_or_else(|| AppError::not_found(format!("Sub-customer {id} not found")))?;
        record.deleted_at = Some(Utc::now());
        Ok(())
    }

    /// Number of organization rows, soft-deleted ones included.
    pub async fn organization_row_count(&self) -> usize {
        self.state.read().await.organizations.len()
    }
}

#[async_trait]
impl StaffStore for MemoryStore {
    async fn find_staff_by_email(&self, email: &str) -> AppResult<Option<StaffPrincipal>> {
        self.check_available()?;
        let state = self.state.read().await;
        state
            .staff
            .values()
            .find(|r| r.deleted_at.is_none() && same_email(&r.email, email))
            .map(|r| state.resolve_staff(r))
            .transpose()
    }

    async fn find_staff_by_id(&self, id: Uuid) -> AppResult<Option<StaffPrincipal>> {
        self.check_available()?;
        let state = self.state.read().await;
        state
            .staff
            .get(&id)
            .filter(|r| r.deleted_at.is_none())
            .map(|r| state.resolve_staff(r))
            .transpose()
    }

    async fn list_staff(&self) -> AppResult<Vec<StaffPrincipal>> {
        self.check_available()?;
        let state = self.state.read().await;
        let mut staff = state
            .staff
            .values()
            .filter(|r| r.deleted_at.is_none())
            .map(|r| state.resolve_staff(r))
            .collect::<AppResult<Vec<_>>>()?;
        staff.sort_by(|a, b| a.staff_id.cmp(&b.staff_id));
        Ok(staff)
    }

    async fn create_staff(&self, data: &CreateStaff) -> AppResult<StaffPrincipal> {
        self.check_available()?;
        let mut state = self.state.write().await;
        if state.staff.values().any(|r| same_email(&r.email, &data.email)) {
            return Err(AppError::conflict(format!(
                "Email '{}' is already in use",
                data.email
            )));
        }
        if state.staff.values().any(|r| r.staff_id == data.staff_id) {
            return Err(AppError::conflict(format!(
                "Staff id '{}' already exists",
                data.staff_id
            )));
        }
        let now = Utc::now();
        let record = StaffRecord {
            id: Uuid::new_v4(),
            staff_id: data.staff_id.clone(),
            email: data.email.clone(),
            name: data.name.clone(),
            password_hash: data.password_hash.clone(),
            status: data.status,
            role: data.role,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        let staff = state.resolve_staff(&record)?;
        state.staff.insert(record.id, record);
        Ok(staff)
    }

    async fn set_staff_status(
        &self,
        id: Uuid,
        status: AccountStatus,
    ) -> AppResult<StaffPrincipal> {
        self.check_available()?;
        let mut state = self.state.write().await;
        let record = state
            .staff
            .get_mut(&id)
            .filter(|r| r.deleted_at.is_none())
            .ok_or_else(|| AppError::not_found(format!("Staff {id} not found")))?;
        record.status = status;
        record.updated_at = Utc::now();
        let record = record.clone();
        state.resolve_staff(&record)
    }
}

#[async_trait]
impl OrganizationStore for MemoryStore {
    async fn find_organization(&self, id: Uuid) -> AppResult<Option<Organization>> {
        self.check_available()?;
        Ok(self.state.read().await.visible_organization(id).cloned())
    }

    async fn list_organizations(&self) -> AppResult<Vec<Organization>> {
        self.check_available()?;
        let state = self.state.read().await;
        let mut organizations: Vec<_> = state
            .organizations
            .values()
            .filter(|o| !o.is_deleted())
            .cloned()
            .collect();
        organizations.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(organizations)
    }

    async fn create_organization_with_owner(
        &self,
        organization: &CreateOrganization,
        owner: &NewOwner,
    ) -> AppResult<(Organization, CustomerUser)> {
        self.check_available()?;
        let mut state = self.state.write().await;
        if state.customer_email_taken(&owner.email) {
            return Err(AppError::conflict(format!(
                "Email '{}' is already in use",
                owner.email
            )));
        }

        let now = Utc::now();
        let org = Organization {
            id: Uuid::new_v4(),
            name: organization.name.clone(),
            company_name: organization.company_name.clone(),
            plan: organization.plan.clone(),
            status: organization.status,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        let record = CustomerUserRecord {
            id: Uuid::new_v4(),
            organization_id: org.id,
            email: owner.email.clone(),
            name: owner.name.clone(),
            password_hash: owner.password_hash.clone(),
            status: AccountStatus::Active,
            role: CustomerRoleName::Owner,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        state.organizations.insert(org.id, org.clone());
        let resolved = state.resolve_customer_user(&record);
        match resolved {
            Ok(Some(user)) => {
                state.customer_users.insert(record.id, record);
                Ok((org, user))
            }
            Ok(None) => {
                state.organizations.remove(&org.id);
                Err(AppError::internal("Provisioned owner is not visible"))
            }
            Err(e) => {
                state.organizations.remove(&org.id);
                Err(e)
            }
        }
    }

    async fn update_organization(
        &self,
        id: Uuid,
        data: &UpdateOrganization,
    ) -> AppResult<Organization> {
        self.check_available()?;
        let mut state = self.state.write().await;
        let org = state
            .organizations
            .get_mut(&id)
            .filter(|o| !o.is_deleted())
            .ok_or_else(|| AppError::not_found(format!("Organization {id} not found")))?;
        if let Some(name) = &data.name {
            org.name = name.clone();
        }
        if let Some(company_name) = &data.company_name {
            org.company_name = company_name.clone();
        }
        if let Some(plan) = &data.plan {
            org.plan = plan.clone();
        }
        org.updated_at = Utc::now();
        Ok(org.clone())
    }

    async fn set_organization_status(
        &self,
        id: Uuid,
        status: AccountStatus,
    ) -> AppResult<Organization> {
        self.check_available()?;
        let mut state = self.state.write().await;
        let org = state
            .organizations
            .get_mut(&id)
            .filter(|o| !o.is_deleted())
            .ok_or_else(|| AppError::not_found(format!("Organization {id} not found")))?;
        org.status = status;
        org.updated_at = Utc::now();
        Ok(org.clone())
    }

    async fn soft_delete_organization(&self, id: Uuid) -> AppResult<()> {
        self.check_available()?;
        let mut state = self.state.write().await;
        let org = state
            .organizations
            .get_mut(&id)
            .filter(|o| !o.is_deleted())
            .ok_or_else(|| AppError::not_found(format!("Organization {id} not found")))?;
        let now = Utc::now();
        org.deleted_at = Some(now);
        org.updated_at = now;
        Ok(())
    }
}

#[async_trait]
impl CustomerUserStore for MemoryStore {
    async fn find_customer_user_by_email(&self, email: &str) -> AppResult<Option<CustomerUser>> {
        self.check_available()?;
        let state = self.state.read().await;
        for record in state.customer_users.values() {
            if same_email(&record.email, email) {
                if let Some(user) = state.resolve_customer_user(record)? {
                    return Ok(Some(user));
                }
            }
        }
        Ok(None)
    }

    async fn find_customer_user_by_id(&self, id: Uuid) -> AppResult<Option<CustomerUser>> {
        self.check_available()?;
        let state = self.state.read().await;
        match state.customer_users.get(&id) {
            Some(record) => state.resolve_customer_user(record),
            None => Ok(None),
        }
    }

    async fn customer_email_exists(&self, email: &str) -> AppResult<bool> {
        self.check_available()?;
        Ok(self.state.read().await.customer_email_taken(email))
    }

    async fn list_customer_users(&self, organization_id: Uuid) -> AppResult<Vec<CustomerUser>> {
        self.check_available()?;
        let state = self.state.read().await;
        let mut users = Vec::new();
        for record in state
            .customer_users
            .values()
            .filter(|r| r.organization_id == organization_id)
        {
            if let Some(user) = state.resolve_customer_user(record)? {
                users.push(user);
            }
        }
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(users)
    }

    async fn create_customer_user(&self, data: &CreateCustomerUser) -> AppResult<CustomerUser> {
        self.check_available()?;
        let mut state = self.state.write().await;
        if !state.organizations.contains_key(&data.organization_id) {
            return Err(AppError::not_found(format!(
                "Organization {} not found",
                data.organization_id
            )));
        }
        if state.customer_email_taken(&data.email) {
            return Err(AppError::conflict(format!(
                "Email '{}' is already in use",
                data.email
            )));
        }
        let now = Utc::now();
        let record = CustomerUserRecord {
            id: Uuid::new_v4(),
            organization_id: data.organization_id,
            email: data.email.clone(),
            name: data.name.clone(),
            password_hash: data.password_hash.clone(),
            status: data.status,
            role: data.role,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        let user = state
            .resolve_customer_user(&record)?
            .ok_or_else(|| AppError::not_found("Organization has been deleted"))?;
        state.customer_users.insert(record.id, record);
        Ok(user)
    }

    async fn set_customer_user_status(
        &self,
        id: Uuid,
        status: AccountStatus,
    ) -> AppResult<CustomerUser> {
        self.check_available()?;
        let mut state = self.state.write().await;
        let record = state
            .customer_users
            .get_mut(&id)
            .filter(|r| r.deleted_at.is_none())
            .ok_or_else(|| AppError::not_found(format!("Customer user {id} not found")))?;
        record.status = status;
        record.updated_at = Utc::now();
        let record = record.clone();
        state
            .resolve_customer_user(&record)?
            .ok_or_else(|| AppError::not_found(format!("Customer user {id} not found")))
    }
}

#[async_trait]
impl SubCustomerStore for MemoryStore {
    async fn find_subcustomer_by_email(&self, email: &str) -> AppResult<Option<SubCustomer>> {
        self.check_available()?;
        let state = self.state.read().await;
        Ok(state
            .sub_customers
            .values()
            .filter(|r| same_email(&r.email, email))
            .find_map(|r| state.resolve_subcustomer(r)))
    }

    async fn find_subcustomer_by_id(&self, id: Uuid) -> AppResult<Option<SubCustomer>> {
        self.check_available()?;
        let state = self.state.read().await;
        Ok(state
            .sub_customers
            .get(&id)
            .and_then(|r| state.resolve_subcustomer(r)))
    }

    async fn create_subcustomer(&self, data: &CreateSubCustomer) -> AppResult<SubCustomer> {
        self.check_available()?;
        let mut state = self.state.write().await;
        if state
            .sub_customers
            .values()
            .any(|r| same_email(&r.email, &data.email))
        {
            return Err(AppError::conflict(format!(
                "Email '{}' is already in use",
                data.email
            )));
        }
        let now = Utc::now();
        let record = SubCustomerRecord {
            id: Uuid::new_v4(),
            organization_id: data.organization_id,
            email: data.email.clone(),
            name: data.name.clone(),
            password_hash: data.password_hash.clone(),
            status: data.status,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        let sub = state.resolve_subcustomer(&record).ok_or_else(|| {
            AppError::not_found(format!("Organization {} not found", data.organization_id))
        })?;
        state.sub_customers.insert(record.id, record);
        Ok(sub)
    }

    async fn set_subcustomer_status(
        &self,
        id: Uuid,
        status: AccountStatus,
    ) -> AppResult<SubCustomer> {
        self.check_available()?;
        let mut state = self.state.write().await;
        let record = state
            .sub_customers
            .get_mut(&id)
            .filter(|r| r.deleted_at.is_none())
            .ok_or_else(|| AppError::not_found(format!("Sub-customer {id} not found")))?;
        record.status = status;
        record.updated_at = Utc::now();
        let record = record.clone();
        state
            .resolve_subcustomer(&record)
            .ok_or_else(|| AppError::not_found(format!("Sub-customer {id} not found")))
    }
}

#[async_trait]
impl AdAccountStore for MemoryStore {
    async fn list_ad_accounts(&self, organization_id: Uuid) -> AppResult<Vec<ConnectedAdAccount>> {
        self.check_available()?;
        let state = self.state.read().await;
        let mut accounts: Vec<_> = state
            .ad_accounts
            .iter()
            .filter(|a| a.organization_id == organization_id)
            .cloned()
            .collect();
        accounts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(accounts)
    }

    async fn create_ad_account(&self, data: &CreateAdAccount) -> AppResult<ConnectedAdAccount> {
        self.check_available()?;
        let mut state = self.state.write().await;
        if state.ad_accounts.iter().any(|a| {
            a.organization_id == data.organization_id
                && a.platform == data.platform
                && a.account_id == data.account_id
        }) {
            return Err(AppError::conflict(format!(
                "{} account '{}' is already connected",
                data.platform, data.account_id
            )));
        }
        let now = Utc::now();
        let account = ConnectedAdAccount {
            id: Uuid::new_v4(),
            organization_id: data.organization_id,
            platform: data.platform,
            account_id: data.account_id.clone(),
            account_name: data.account_name.clone(),
            access_token: data.access_token.clone(),
            refresh_token: data.refresh_token.clone(),
            token_expires_at: data.token_expires_at,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        state.ad_accounts.push(account.clone());
        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acme() -> CreateOrganization {
        CreateOrganization {
            name: "Acme Corporation".to_string(),
            company_name: "Acme Corp".to_string(),
            plan: "enterprise".to_string(),
            status: AccountStatus::Active,
        }
    }

    fn owner(email: &str) -> NewOwner {
        NewOwner {
            email: email.to_string(),
            name: "John Smith".to_string(),
            password_hash: "hash".to_string(),
        }
    }

    #[tokio::test]
    async fn test_lookup_is_case_insensitive() {
        let store = MemoryStore::new();
        store
            .create_organization_with_owner(&acme(), &owner("john@acmecorp.com"))
            .await
            .unwrap();

        let found = store
            .find_customer_user_by_email("JOHN@AcmeCorp.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.role.name, CustomerRoleName::Owner);
        assert_eq!(found.organization.company_name, "Acme Corp");
    }

    #[tokio::test]
    async fn test_deleted_organization_hides_members() {
        let store = MemoryStore::new();
        let (org, _) = store
            .create_organization_with_owner(&acme(), &owner("john@acmecorp.com"))
            .await
            .unwrap();
        store.soft_delete_organization(org.id).await.unwrap();

        assert!(
            store
                .find_customer_user_by_email("john@acmecorp.com")
                .await
                .unwrap()
                .is_none()
        );
        assert!(store.find_organization(org.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_owner_leaves_no_organization_behind() {
        let store = MemoryStore::new();
        store
            .create_organization_with_owner(&acme(), &owner("john@acmecorp.com"))
            .await
            .unwrap();

        let err = store
            .create_organization_with_owner(&acme(), &owner("John@acmecorp.com"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, adportal_core::ErrorKind::Conflict);
        assert_eq!(store.organization_row_count().await, 1);
    }

    #[tokio::test]
    async fn test_soft_deleted_staff_is_invisible_but_keeps_email() {
        let store = MemoryStore::new();
        let staff = store
            .create_staff(&CreateStaff {
                staff_id: "admin001".to_string(),
                email: "admin001@admin.com".to_string(),
                name: "Alex Scalia".to_string(),
                password_hash: "hash".to_string(),
                role: StaffRoleName::Administrator,
                status: AccountStatus::Active,
            })
            .await
            .unwrap();
        store.soft_delete_staff(staff.id).await.unwrap();

        assert!(
            store
                .find_staff_by_email("admin001@admin.com")
                .await
                .unwrap()
                .is_none()
        );
        assert!(store.find_staff_by_id(staff.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unavailable_store_fails_every_call() {
        let store = MemoryStore::new();
        store.set_unavailable(true);
        let err = store.find_staff_by_email("x@admin.com").await.unwrap_err();
        assert!(err.kind.is_server_side());
    }
}
