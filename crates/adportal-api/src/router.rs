//! Route definitions for the ad portal HTTP API.
//!
//! Everything is mounted under `/api`. The three tenant trees are each
//! wrapped in their own guard; sign-in and health stay public.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post, put},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(auth_routes(&state))
        .nest("/staff", staff_routes(&state))
        .nest("/customer", customer_routes(&state))
        .nest("/subcustomer", subcustomer_routes(&state))
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Sign-in per kind, behind the optional rate limiter, and sign-out.
fn auth_routes(state: &AppState) -> Router<AppState> {
    let signin = Router::new()
        .route("/auth/{kind}/signin", post(handlers::auth::sign_in))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::rate_limit::signin_rate_limit,
        ));

    Router::new()
        .merge(signin)
        .route("/auth/signout", post(handlers::auth::sign_out))
}

/// Staff tree: organizations and principal status
fn staff_routes(state: &AppState) -> Router<AppState> {
    use handlers::staff::{organizations, principals};

    Router::new()
        .route(
            "/organizations",
            get(organizations::list_organizations).post(organizations::provision_organization),
        )
        .route(
            "/organizations/{id}",
            get(organizations::get_organization)
                .put(organizations::update_organization)
                .delete(organizations::delete_organization),
        )
        .route(
            "/organizations/{id}/status",
            put(organizations::set_organization_status),
        )
        .route(
            "/principals/{kind}/{id}/status",
            put(principals::set_principal_status),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::guard::require_staff_session,
        ))
}

/// Customer tree: connected ad accounts
fn customer_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/accounts",
            get(handlers::customer::list_accounts).post(handlers::customer::connect_account),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::guard::require_customer_session,
        ))
}

/// Sub-customer tree: read-only accounts
fn subcustomer_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/accounts", get(handlers::subcustomer::list_accounts))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::guard::require_subcustomer_session,
        ))
}

/// Health check
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
