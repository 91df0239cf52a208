//! Sign-in endpoints: status gates, error surface, cookie and callback handling.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::json;

use adportal_auth::JwtDecoder;
use adportal_database::seed::DEMO_PASSWORD;
use adportal_database::{CustomerUserStore, OrganizationStore};
use adportal_entity::AccountStatus;

use crate::helpers::{TestApp, test_config};

#[tokio::test]
async fn test_staff_signin_sets_cookie_with_effective_role() {
    let app = TestApp::new().await;

    let response = app
        .sign_in("staff", "admin001@admin.com", DEMO_PASSWORD)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(response.body["kind"], "staff");
    assert_eq!(response.body["redirect_to"], "/staff/dashboard");
    assert!(response.body.get("token").is_none());

    let cookie = response.set_cookie().expect("session cookie");
    assert!(cookie.starts_with("adportal_session="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Path=/"));
    let max_age = format!("Max-Age={}", app.config.auth.session_ttl_minutes * 60);
    assert!(cookie.contains(&max_age));
    assert!(!cookie.contains("Secure"));

    let token = cookie
        .split(';')
        .next()
        .and_then(|pair| pair.strip_prefix("adportal_session="))
        .unwrap();
    let claims = JwtDecoder::new(&app.config.auth).decode(token).unwrap();
    assert_eq!(claims.session.effective_role, "Administrator");
    assert_eq!(claims.session.email, "admin001@admin.com");
    assert!(claims.session.organization_id.is_none());
}

#[tokio::test]
async fn test_unreadable_body_is_an_invalid_credentials_rejection() {
    let app = TestApp::new().await;
    let expected = app
        .sign_in("staff", "nobody@admin.com", DEMO_PASSWORD)
        .await;

    let form = Request::builder()
        .method("POST")
        .uri("/api/auth/staff/signin")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("email=admin001%40admin.com&password=password"))
        .unwrap();
    let form = app.send(form).await;
    assert_eq!(form.status, StatusCode::UNAUTHORIZED);
    assert_eq!(form.body, expected.body);
    assert!(form.set_cookie().is_none());

    let mistyped = app
        .request(
            "POST",
            "/api/auth/staff/signin",
            Some(json!({ "email": 5 })),
            None,
        )
        .await;
    assert_eq!(mistyped.status, StatusCode::UNAUTHORIZED);
    assert_eq!(mistyped.body["error"], "credentials");
    assert_eq!(mistyped.body, expected.body);
}

#[tokio::test]
async fn test_email_lookup_ignores_case_and_whitespace() {
    let app = TestApp::new().await;
    let response = app
        .sign_in("customer", "  John@AcmeCorp.com ", DEMO_PASSWORD)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["redirect_to"], "/customer/dashboard");
}

#[tokio::test]
async fn test_wrong_password_and_unknown_email_look_identical() {
    let app = TestApp::new().await;

    let wrong = app
        .sign_in("customer", "john@acmecorp.com", "not-the-password")
        .await;
    let unknown = app
        .sign_in("customer", "nobody@acmecorp.com", DEMO_PASSWORD)
        .await;

    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.body, unknown.body);
    assert_eq!(wrong.body["error"], "credentials");
    assert_eq!(wrong.body["headline"], "Invalid email or password");
    assert!(wrong.set_cookie().is_none());
}

#[tokio::test]
async fn test_empty_fields_are_invalid_credentials() {
    let app = TestApp::new().await;
    let response = app.sign_in("staff", "", "").await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["headline"], "Invalid email or password");
}

#[tokio::test]
async fn test_suspended_organization_blocks_correct_password() {
    let app = TestApp::new().await;
    let john = app
        .store
        .find_customer_user_by_email("john@acmecorp.com")
        .await
        .unwrap()
        .unwrap();
    app.store
        .set_organization_status(john.organization.id, AccountStatus::Suspended)
        .await
        .unwrap();

    let response = app
        .sign_in("customer", "john@acmecorp.com", DEMO_PASSWORD)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "credentials");
    assert_eq!(response.body["headline"], "Organization suspended");
}

#[tokio::test]
async fn test_wrong_password_never_reveals_organization_status() {
    let app = TestApp::new().await;
    let john = app
        .store
        .find_customer_user_by_email("john@acmecorp.com")
        .await
        .unwrap()
        .unwrap();
    app.store
        .set_organization_status(john.organization.id, AccountStatus::Suspended)
        .await
        .unwrap();

    let response = app
        .sign_in("customer", "john@acmecorp.com", "wrong-password")
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["headline"], "Invalid email or password");
}

#[tokio::test]
async fn test_organization_status_checked_before_account_status() {
    let app = TestApp::new().await;
    let bob = app
        .store
        .find_customer_user_by_email("bob@acmecorp.com")
        .await
        .unwrap()
        .unwrap();
    app.store
        .set_customer_user_status(bob.id, AccountStatus::Suspended)
        .await
        .unwrap();

    let response = app
        .sign_in("customer", "bob@acmecorp.com", DEMO_PASSWORD)
        .await;
    assert_eq!(response.body["headline"], "Account suspended");

    app.store
        .set_organization_status(bob.organization.id, AccountStatus::Pending)
        .await
        .unwrap();
    let response = app
        .sign_in("customer", "bob@acmecorp.com", DEMO_PASSWORD)
        .await;
    assert_eq!(response.body["headline"], "Organization pending approval");
}

#[tokio::test]
async fn test_principal_kinds_are_disjoint() {
    let app = TestApp::new().await;
    let response = app
        .sign_in("staff", "john@acmecorp.com", DEMO_PASSWORD)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["headline"], "Invalid email or password");

    let response = app
        .sign_in("subcustomer", "admin001@admin.com", DEMO_PASSWORD)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unknown_kind_is_not_found() {
    let app = TestApp::new().await;
    let response = app
        .sign_in("partner", "john@acmecorp.com", DEMO_PASSWORD)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_store_outage_is_a_server_error() {
    let app = TestApp::new().await;
    app.store.set_unavailable(true);

    let response = app
        .sign_in("staff", "admin001@admin.com", DEMO_PASSWORD)
        .await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["error"], "server");
    assert!(response.set_cookie().is_none());
}

#[tokio::test]
async fn test_local_callback_is_followed_and_foreign_one_ignored() {
    let app = TestApp::new().await;
    let body = serde_json::json!({ "email": "jane@acmecorp.com", "password": DEMO_PASSWORD });

    let response = app
        .request(
            "POST",
            "/api/auth/customer/signin?callbackUrl=%2Fcustomer%2Fcampaigns",
            Some(body.clone()),
            None,
        )
        .await;
    assert_eq!(response.body["redirect_to"], "/customer/campaigns");

    let response = app
        .request(
            "POST",
            "/api/auth/customer/signin?callbackUrl=https%3A%2F%2Fevil.example",
            Some(body),
            None,
        )
        .await;
    assert_eq!(response.body["redirect_to"], "/customer/dashboard");
}

#[tokio::test]
async fn test_signout_clears_cookie() {
    let app = TestApp::new().await;
    let cookie = app.session_cookie("staff", "admin002@admin.com").await;

    let response = app
        .request("POST", "/api/auth/signout", None, Some(&cookie))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let cleared = response.set_cookie().expect("removal cookie");
    assert!(cleared.starts_with("adportal_session="));
    assert!(cleared.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_rate_limiter_throttles_signin_when_enabled() {
    let mut config = test_config();
    config.auth.rate_limit.enabled = true;
    config.auth.rate_limit.max_attempts = 2;
    config.auth.rate_limit.refill_per_second = 0.0;
    let app = TestApp::with_config(config).await;

    for _ in 0..2 {
        let response = app.sign_in("staff", "admin001@admin.com", "wrong").await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    }
    let response = app
        .sign_in("staff", "admin001@admin.com", DEMO_PASSWORD)
        .await;
    assert_eq!(response.status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(response.body["error"], "RATE_LIMITED");
}
