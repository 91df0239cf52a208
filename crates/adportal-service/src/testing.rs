//! Shared fixtures for service tests.

use std::sync::Arc;
use std::time::Duration;

use uuid::Uuid;

use adportal_auth::{PasswordHasher, RevocationList};
use adportal_core::config::auth::AuthConfig;
use adportal_database::seed::{DEMO_PASSWORD, seed_demo_data};
use adportal_database::{CredentialStore, CustomerUserStore, MemoryStore, StaffStore};
use adportal_entity::PrincipalKind;
use adportal_entity::customer::CustomerRoleName;

use crate::context::RequestContext;

pub(crate) fn fast_auth_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: "service-test-secret".to_string(),
        hash_memory_kib: 1024,
        hash_iterations: 1,
        hash_parallelism: 1,
        ..AuthConfig::default()
    }
}

pub(crate) struct Seeded {
    pub store: MemoryStore,
    pub shared: Arc<dyn CredentialStore>,
    pub hasher: Arc<PasswordHasher>,
    pub revocations: Arc<RevocationList>,
}

pub(crate) async fn seeded() -> Seeded {
    let hasher = Arc::new(PasswordHasher::new(&fast_auth_config()).unwrap());
    let hash = hasher.hash_password(DEMO_PASSWORD).unwrap();
    let store = MemoryStore::new();
    seed_demo_data(&store, &hash).await.unwrap();
    Seeded {
        shared: Arc::new(store.clone()),
        store,
        hasher,
        revocations: Arc::new(RevocationList::new(Duration::from_secs(3600))),
    }
}

pub(crate) async fn staff_ctx(store: &MemoryStore) -> RequestContext {
    let admin = store
        .find_staff_by_email("admin001@admin.com")
        .await
        .unwrap()
        .unwrap();
    RequestContext {
        principal_id: admin.id,
        kind: PrincipalKind::Staff,
        effective_role: admin.role.name.as_str().to_string(),
        organization_id: None,
        organization_role: None,
        email: admin.email,
        session_id: Uuid::new_v4(),
        request_time: chrono::Utc::now(),
    }
}

pub(crate) async fn customer_ctx(store: &MemoryStore, email: &str) -> RequestContext {
    let user = store
        .find_customer_user_by_email(email)
        .await
        .unwrap()
        .unwrap();
    RequestContext {
        principal_id: user.id,
        kind: PrincipalKind::CustomerUser,
        effective_role: "customer-user".to_string(),
        organization_id: Some(user.organization.id),
        organization_role: Some(user.role.name),
        email: user.email,
        session_id: Uuid::new_v4(),
        request_time: chrono::Utc::now(),
    }
}

pub(crate) fn subcustomer_ctx(organization_id: Uuid) -> RequestContext {
    RequestContext {
        principal_id: Uuid::new_v4(),
        kind: PrincipalKind::SubCustomer,
        effective_role: "subcustomer".to_string(),
        organization_id: Some(organization_id),
        organization_role: None::<CustomerRoleName>,
        email: "sub@acmecorp.com".to_string(),
        session_id: Uuid::new_v4(),
        request_time: chrono::Utc::now(),
    }
}
