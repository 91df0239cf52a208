//! Demo data for local development.

use tracing::info;

use adportal_core::result::AppResult;
use adportal_entity::AccountStatus;
use adportal_entity::customer::{CreateCustomerUser, CustomerRoleName, NewOwner};
use adportal_entity::organization::CreateOrganization;
use adportal_entity::staff::{CreateStaff, StaffRoleName};

use crate::store::CredentialStore;

/// Password every demo account is seeded with.
pub const DEMO_PASSWORD: &str = "password";

const DEMO_STAFF: [(&str, &str, &str, StaffRoleName); 5] = [
    ("admin001", "admin001@admin.com", "Alex Scalia", StaffRoleName::Administrator),
    ("admin002", "admin002@admin.com", "Sarah Johnson", StaffRoleName::SupportAgent),
    ("admin003", "admin003@admin.com", "Michael Chen", StaffRoleName::SupportAgent),
    ("admin004", "admin004@admin.com", "Emma Rodriguez", StaffRoleName::Administrator),
    ("admin005", "admin005@admin.com", "David Thompson", StaffRoleName::SupportAgent),
];

struct DemoOrganization {
    name: &'static str,
    company_name: &'static str,
    plan: &'static str,
    owner: (&'static str, &'static str),
    members: &'static [(&'static str, &'static str, CustomerRoleName)],
}

const DEMO_ORGANIZATIONS: [DemoOrganization; 2] = [
    DemoOrganization {
        name: "Acme Corporation",
        company_name: "Acme Corp",
        plan: "enterprise",
        owner: ("john@acmecorp.com", "John Smith"),
        members: &[
            ("jane@acmecorp.com", "Jane Doe", CustomerRoleName::Editor),
            ("bob@acmecorp.com", "Bob Wilson", CustomerRoleName::Viewer),
        ],
    },
    DemoOrganization {
        name: "Tech Startup Inc",
        company_name: "TechStartup",
        plan: "professional",
        owner: ("alice@techstartup.com", "Alice Johnson"),
        members: &[("mike@techstartup.com", "Mike Davis", CustomerRoleName::Editor)],
    },
];

/// What a seeding run created.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedSummary {
    /// Staff members created.
    pub staff: usize,
    /// Organizations created.
    pub organizations: usize,
    /// Customer users created, owners included.
    pub customer_users: usize,
}

/// Seed demo staff, organizations and customer users.
///
/// Records whose email already exists are skipped, so the run can be
/// repeated. Every account receives `password_hash`.
pub async fn seed_demo_data(
    store: &dyn CredentialStore,
    password_hash: &str,
) -> AppResult<SeedSummary> {
    let mut summary = SeedSummary::default();

    for (staff_id, email, name, role) in DEMO_STAFF {
        if store.find_staff_by_email(email).await?.is_some() {
            continue;
        }
        store
            .create_staff(&CreateStaff {
                staff_id: staff_id.to_string(),
                email: email.to_string(),
                name: name.to_string(),
                password_hash: password_hash.to_string(),
                role,
                status: AccountStatus::Active,
            })
            .await?;
        summary.staff += 1;
    }

    for demo in &DEMO_ORGANIZATIONS {
        let (owner_email, owner_name) = demo.owner;
        if store.customer_email_exists(owner_email).await? {
            continue;
        }
        let (organization, _) = store
            .create_organization_with_owner(
                &CreateOrganization {
                    name: demo.name.to_string(),
                    company_name: demo.company_name.to_string(),
                    plan: demo.plan.to_string(),
                    status: AccountStatus::Active,
                },
                &NewOwner {
                    email: owner_email.to_string(),
                    name: owner_name.to_string(),
                    password_hash: password_hash.to_string(),
                },
            )
            .await?;
        summary.organizations += 1;
        summary.customer_users += 1;

        for (email, name, role) in demo.members {
            if store.customer_email_exists(email).await? {
                continue;
            }
            store
                .create_customer_user(&CreateCustomerUser {
                    organization_id: organization.id,
                    email: email.to_string(),
                    name: name.to_string(),
                    password_hash: password_hash.to_string(),
                    role: *role,
                    status: AccountStatus::Active,
                })
                .await?;
            summary.customer_users += 1;
        }
    }

    info!(
        staff = summary.staff,
        organizations = summary.organizations,
        customer_users = summary.customer_users,
        "Demo data seeded"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::store::{CustomerUserStore, StaffStore};

    #[tokio::test]
    async fn test_seed_is_repeatable() {
        let store = MemoryStore::new();
        let first = seed_demo_data(&store, "hash").await.unwrap();
        assert_eq!(
            first,
            SeedSummary {
                staff: 5,
                organizations: 2,
                customer_users: 5,
            }
        );

        let second = seed_demo_data(&store, "hash").await.unwrap();
        assert_eq!(second, SeedSummary::default());
    }

    #[tokio::test]
    async fn test_seed_assigns_roles() {
        let store = MemoryStore::new();
        seed_demo_data(&store, "hash").await.unwrap();

        let admin = store
            .find_staff_by_email("admin001@admin.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(admin.role.name, StaffRoleName::Administrator);

        let bob = store
            .find_customer_user_by_email("bob@acmecorp.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(bob.role.name, CustomerRoleName::Viewer);
        assert_eq!(bob.organization.plan, "enterprise");
    }
}
