//! Customer and sub-customer trees: connected ad accounts.

use axum::http::StatusCode;
use serde_json::json;

use adportal_database::seed::DEMO_PASSWORD;
use adportal_database::{CustomerUserStore, SubCustomerStore};
use adportal_entity::AccountStatus;
use adportal_entity::subcustomer::CreateSubCustomer;

use crate::helpers::TestApp;

fn connect_body(account_id: &str) -> serde_json::Value {
    json!({
        "platform": "google_ads",
        "accountId": account_id,
        "accountName": "Acme Search",
        "accessToken": "ya29.secret-access",
        "refreshToken": "1//secret-refresh"
    })
}

#[tokio::test]
async fn test_owner_connects_and_tokens_never_return() {
    let app = TestApp::new().await;
    let john = app.session_cookie("customer", "john@acmecorp.com").await;

    let response = app
        .request(
            "POST",
            "/api/customer/accounts",
            Some(connect_body("123-456-7890")),
            Some(&john),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert!(!response.body.to_string().contains("secret"));

    let jane = app.session_cookie("customer", "jane@acmecorp.com").await;
    let response = app
        .request("GET", "/api/customer/accounts", None, Some(&jane))
        .await;
    assert_eq!(response.body["data"].as_array().unwrap().len(), 1);
    assert!(!response.body.to_string().contains("secret"));

    let alice = app.session_cookie("customer", "alice@techstartup.com").await;
    let response = app
        .request("GET", "/api/customer/accounts", None, Some(&alice))
        .await;
    assert!(response.body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_viewer_cannot_connect() {
    let app = TestApp::new().await;
    let bob = app.session_cookie("customer", "bob@acmecorp.com").await;

    let response = app
        .request(
            "POST",
            "/api/customer/accounts",
            Some(connect_body("1")),
            Some(&bob),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["error"], "FORBIDDEN");
}

#[tokio::test]
async fn test_subcustomer_reads_organization_accounts() {
    let app = TestApp::new().await;
    let org_id = app
        .store
        .find_customer_user_by_email("john@acmecorp.com")
        .await
        .unwrap()
        .unwrap()
        .organization
        .id;
    app.store
        .create_subcustomer(&CreateSubCustomer {
            organization_id: org_id,
            email: "agency@partner.com".to_string(),
            name: "Partner Agency".to_string(),
            password_hash: app.hash(DEMO_PASSWORD),
            status: AccountStatus::Active,
        })
        .await
        .unwrap();

    let john = app.session_cookie("customer", "john@acmecorp.com").await;
    app.request(
        "POST",
        "/api/customer/accounts",
        Some(connect_body("42")),
        Some(&john),
    )
    .await;

    let sub = app.session_cookie("subcustomer", "agency@partner.com").await;
    let response = app
        .request("GET", "/api/subcustomer/accounts", None, Some(&sub))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"][0]["account_id"], "42");

    let response = app
        .request("GET", "/api/customer/accounts", None, Some(&sub))
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
}
