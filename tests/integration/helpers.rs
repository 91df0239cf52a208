//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use adportal_api::{AppState, build_app};
use adportal_auth::PasswordHasher;
use adportal_core::config::AppConfig;
use adportal_database::MemoryStore;
use adportal_database::seed::{DEMO_PASSWORD, seed_demo_data};

/// Configuration with cheap argon2 parameters and a fixed secret.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::from_toml_str("").expect("Failed to build test config");
    config.auth.jwt_secret = "integration-test-secret".to_string();
    config.auth.hash_memory_kib = 1024;
    config.auth.hash_iterations = 1;
    config.auth.hash_parallelism = 1;
    config.session.cookie_secure = false;
    config
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Seeded store, shared with the router
    pub store: MemoryStore,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a test application over freshly seeded demo data
    pub async fn new() -> Self {
        Self::with_config(test_config()).await
    }

    /// Create a test application with a custom configuration
    pub async fn with_config(config: AppConfig) -> Self {
        let store = MemoryStore::new();
        let hasher = PasswordHasher::new(&config.auth).expect("Failed to build hasher");
        let hash = hasher
            .hash_password(DEMO_PASSWORD)
            .expect("Failed to hash password");
        seed_demo_data(&store, &hash)
            .await
            .expect("Failed to seed demo data");

        let state = AppState::new(config.clone(), Arc::new(store.clone()), None)
            .expect("Failed to build state");

        Self {
            router: build_app(state),
            store,
            config,
        }
    }

    /// Hash a password with the app's parameters
    pub fn hash(&self, password: &str) -> String {
        PasswordHasher::new(&self.config.auth)
            .expect("Failed to build hasher")
            .hash_password(password)
            .expect("Failed to hash password")
    }

    /// POST to a sign-in endpoint
    pub async fn sign_in(&self, kind: &str, email: &str, password: &str) -> TestResponse {
        self.request(
            "POST",
            &format!("/api/auth/{kind}/signin"),
            Some(serde_json::json!({ "email": email, "password": password })),
            None,
        )
        .await
    }

    /// Sign in and return the `name=value` pair to send back as a cookie
    pub async fn session_cookie(&self, kind: &str, email: &str) -> String {
        let response = self.sign_in(kind, email, DEMO_PASSWORD).await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Sign-in failed: {:?}",
            response.body
        );
        response
            .set_cookie()
            .and_then(|c| c.split(';').next())
            .expect("No session cookie in sign-in response")
            .to_string()
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        cookie: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(cookie) = cookie {
            req = req.header(header::COOKIE, cookie);
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Send a prepared request
    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `Location` header, if any
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }

    /// The first `Set-Cookie` header, if any
    pub fn set_cookie(&self) -> Option<&str> {
        self.headers
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
    }
}
