//! Staff tree: organization provisioning and principal status administration.

use axum::http::StatusCode;
use serde_json::{Value, json};

use adportal_database::CustomerUserStore;
use adportal_database::seed::DEMO_PASSWORD;

use crate::helpers::TestApp;

fn provision_body(owner_email: &str) -> Value {
    json!({
        "orgDisplayName": "Globex",
        "companyName": "Globex Corporation",
        "plan": "professional",
        "ownerName": "Hank Scorpio",
        "ownerEmail": owner_email,
        "ownerPassword": "volcano-lair"
    })
}

#[tokio::test]
async fn test_provision_creates_organization_and_owner() {
    let app = TestApp::new().await;
    let staff = app.session_cookie("staff", "admin002@admin.com").await;

    let response = app
        .request(
            "POST",
            "/api/staff/organizations",
            Some(provision_body("Hank@Globex.com")),
            Some(&staff),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let data = &response.body["data"];
    assert_eq!(data["organization"]["status"], "ACTIVE");
    assert_eq!(data["owner"]["email"], "hank@globex.com");
    assert_eq!(data["owner"]["role"]["name"], "Owner");
    assert!(data["owner"].get("password_hash").is_none());
    assert!(!response.body.to_string().contains("volcano-lair"));

    let owner = app
        .sign_in("customer", "hank@globex.com", "volcano-lair")
        .await;
    assert_eq!(owner.status, StatusCode::OK);
}

#[tokio::test]
async fn test_duplicate_owner_email_conflicts_without_partial_rows() {
    let app = TestApp::new().await;
    let staff = app.session_cookie("staff", "admin001@admin.com").await;
    let before = app.store.organization_row_count().await;

    let response = app
        .request(
            "POST",
            "/api/staff/organizations",
            Some(provision_body("JANE@acmecorp.com")),
            Some(&staff),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.body["error"], "CONFLICT");
    assert_eq!(app.store.organization_row_count().await, before);
}

#[tokio::test]
async fn test_validation_lists_every_bad_field() {
    let app = TestApp::new().await;
    let staff = app.session_cookie("staff", "admin001@admin.com").await;

    let response = app
        .request(
            "POST",
            "/api/staff/organizations",
            Some(json!({
                "orgDisplayName": "Globex",
                "plan": "professional",
                "ownerName": "Hank Scorpio",
                "ownerEmail": "not-an-email",
                "ownerPassword": "short"
            })),
            Some(&staff),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
    let details: Vec<&str> = response.body["details"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(Value::as_str)
        .collect();
    assert_eq!(
        details,
        vec![
            "companyName: must be 1 to 255 characters",
            "ownerEmail: must be a valid email address",
            "ownerPassword: must be at least 8 characters",
        ]
    );
}

#[tokio::test]
async fn test_organization_detail_and_update() {
    let app = TestApp::new().await;
    let staff = app.session_cookie("staff", "admin001@admin.com").await;
    let org_id = app
        .store
        .find_customer_user_by_email("john@acmecorp.com")
        .await
        .unwrap()
        .unwrap()
        .organization
        .id;

    let response = app
        .request(
            "GET",
            &format!("/api/staff/organizations/{org_id}"),
            None,
            Some(&staff),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["organization"]["name"], "Acme Corporation");
    assert_eq!(response.body["data"]["members"].as_array().unwrap().len(), 3);

    let response = app
        .request(
            "PUT",
            &format!("/api/staff/organizations/{org_id}"),
            Some(json!({ "plan": "starter" })),
            Some(&staff),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["plan"], "starter");
    assert_eq!(response.body["data"]["company_name"], "Acme Corp");
}

#[tokio::test]
async fn test_deleted_organization_members_cannot_sign_in() {
    let app = TestApp::new().await;
    let staff = app.session_cookie("staff", "admin001@admin.com").await;
    let org_id = app
        .store
        .find_customer_user_by_email("alice@techstartup.com")
        .await
        .unwrap()
        .unwrap()
        .organization
        .id;

    let response = app
        .request(
            "DELETE",
            &format!("/api/staff/organizations/{org_id}"),
            None,
            Some(&staff),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request(
            "GET",
            &format!("/api/staff/organizations/{org_id}"),
            None,
            Some(&staff),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .sign_in("customer", "alice@techstartup.com", DEMO_PASSWORD)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["headline"], "Invalid email or password");
}

#[tokio::test]
async fn test_principal_status_change_blocks_sign_in() {
    let app = TestApp::new().await;
    let staff = app.session_cookie("staff", "admin001@admin.com").await;
    let jane = app
        .store
        .find_customer_user_by_email("jane@acmecorp.com")
        .await
        .unwrap()
        .unwrap();

    let response = app
        .request(
            "PUT",
            &format!("/api/staff/principals/customer/{}/status", jane.id),
            Some(json!({ "status": "INACTIVE" })),
            Some(&staff),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "INACTIVE");
    assert_eq!(response.body["data"]["kind"], "customer-user");

    let response = app
        .sign_in("customer", "jane@acmecorp.com", DEMO_PASSWORD)
        .await;
    assert_eq!(response.body["headline"], "Account disabled");
}

#[tokio::test]
async fn test_unknown_principal_kind_and_id() {
    let app = TestApp::new().await;
    let staff = app.session_cookie("staff", "admin001@admin.com").await;
    let id = uuid::Uuid::new_v4();

    let response = app
        .request(
            "PUT",
            &format!("/api/staff/principals/robot/{id}/status"),
            Some(json!({ "status": "ACTIVE" })),
            Some(&staff),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .request(
            "PUT",
            &format!("/api/staff/principals/staff/{id}/status"),
            Some(json!({ "status": "ACTIVE" })),
            Some(&staff),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
