//! Tenant tree guards.
//!
//! Each tree is wrapped by one of the `require_*_session` functions. A
//! request that fails the guard is answered with `303 See Other` to the
//! tree's sign-in page; one that passes carries a `RequestContext`.

use axum::extract::{OriginalUri, Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;

use adportal_auth::{GuardDecision, RouteTree};
use adportal_service::RequestContext;

use crate::state::AppState;

/// Guard for `/api/staff/*`.
pub async fn require_staff_session(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    guard_tree(&state, RouteTree::Staff, request, next).await
}

/// Guard for `/api/customer/*`.
pub async fn require_customer_session(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    guard_tree(&state, RouteTree::Customer, request, next).await
}

/// Guard for `/api/subcustomer/*`.
pub async fn require_subcustomer_session(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    guard_tree(&state, RouteTree::SubCustomer, request, next).await
}

async fn guard_tree(state: &AppState, tree: RouteTree, mut request: Request, next: Next) -> Response {
    let token = session_token(request.headers(), &state.config.session.cookie_name);
    let original_path = original_path(&request);

    match state
        .guard
        .evaluate(tree, token.as_deref(), &original_path)
        .await
    {
        GuardDecision::Allow(claims) => {
            request
                .extensions_mut()
                .insert(RequestContext::from_claims(&claims));
            next.run(request).await
        }
        GuardDecision::Redirect { location } => Redirect::to(&location).into_response(),
    }
}

/// Session token from the cookie, else from `Authorization: Bearer`.
pub fn session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    if let Some(cookie) = jar.get(cookie_name) {
        return Some(cookie.value().to_string());
    }

    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
}

/// Path and query as the client sent them, before nesting stripped the prefix.
fn original_path(request: &Request) -> String {
    let uri = request
        .extensions()
        .get::<OriginalUri>()
        .map(|OriginalUri(uri)| uri)
        .unwrap_or_else(|| request.uri());
    uri.path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string())
}
