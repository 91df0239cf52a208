//! Route guard behaviour on the three tenant trees.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};

use adportal_database::CustomerUserStore;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_missing_session_redirects_to_tree_signin_with_callback() {
    let app = TestApp::new().await;

    let cases = [
        ("/api/staff/organizations", "/auth/staff/signin"),
        ("/api/customer/accounts", "/auth/customer/signin"),
        ("/api/subcustomer/accounts", "/auth/subcustomer/signin"),
    ];
    for (path, signin) in cases {
        let response = app.request("GET", path, None, None).await;
        assert_eq!(response.status, StatusCode::SEE_OTHER, "{path}");
        let location = response.location().unwrap();
        assert!(location.starts_with(signin), "{location}");
        assert!(location.contains("callbackUrl=%2Fapi%2F"), "{location}");
    }
}

#[tokio::test]
async fn test_callback_keeps_query_string() {
    let app = TestApp::new().await;
    let response = app
        .request("GET", "/api/customer/accounts?platform=meta", None, None)
        .await;
    assert_eq!(
        response.location(),
        Some("/auth/customer/signin?callbackUrl=%2Fapi%2Fcustomer%2Faccounts%3Fplatform%3Dmeta")
    );
}

#[tokio::test]
async fn test_session_from_another_tree_redirects() {
    let app = TestApp::new().await;
    let staff = app.session_cookie("staff", "admin001@admin.com").await;
    let customer = app.session_cookie("customer", "john@acmecorp.com").await;

    let response = app
        .request("GET", "/api/customer/accounts", None, Some(&staff))
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert!(response.location().unwrap().starts_with("/auth/customer/signin"));

    let response = app
        .request("GET", "/api/staff/organizations", None, Some(&customer))
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert!(response.location().unwrap().starts_with("/auth/staff/signin"));

    let response = app
        .request("GET", "/api/subcustomer/accounts", None, Some(&customer))
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_own_tree_is_allowed() {
    let app = TestApp::new().await;
    let customer = app.session_cookie("customer", "john@acmecorp.com").await;
    let response = app
        .request("GET", "/api/customer/accounts", None, Some(&customer))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
}

#[tokio::test]
async fn test_bearer_token_is_accepted() {
    let app = TestApp::new().await;
    let cookie = app.session_cookie("staff", "admin003@admin.com").await;
    let token = cookie.trim_start_matches("adportal_session=");

    let req = Request::builder()
        .method("GET")
        .uri("/api/staff/organizations")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    let response = app.send(req).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_tampered_token_redirects() {
    let app = TestApp::new().await;
    let cookie = app.session_cookie("staff", "admin001@admin.com").await;
    let tampered = format!("{cookie}x");

    let response = app
        .request("GET", "/api/staff/organizations", None, Some(&tampered))
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_suspending_organization_revokes_live_sessions() {
    let app = TestApp::new().await;
    let staff = app.session_cookie("staff", "admin001@admin.com").await;
    let john = app.session_cookie("customer", "john@acmecorp.com").await;
    let alice = app.session_cookie("customer", "alice@techstartup.com").await;

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
            "PUT",
            &format!("/api/staff/organizations/{org_id}/status"),
            Some(serde_json::json!({ "status": "SUSPENDED" })),
            Some(&staff),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "SUSPENDED");

    let response = app
        .request("GET", "/api/customer/accounts", None, Some(&john))
        .await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);

    let response = app
        .request("GET", "/api/customer/accounts", None, Some(&alice))
        .await;
    assert_eq!(response.status, StatusCode::OK);
}
