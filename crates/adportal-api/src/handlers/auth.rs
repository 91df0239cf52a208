//! Sign-in and sign-out handlers.

use std::collections::HashMap;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tracing::debug;

use adportal_auth::{Credentials, ErrorSurface, RejectionReason, map_rejection};
use adportal_core::config::session::SessionConfig;
use adportal_service::SignInOutcome;

use crate::dto::request::SignInRequest;
use crate::dto::response::{ApiResponse, MessageResponse, SignInErrorResponse, SignInResponse};
use crate::error::ApiError;
use crate::extractors::path::parse_kind;
use crate::state::AppState;

/// POST /api/auth/{kind}/signin
///
/// 200 with the session cookie on success, 401 with display copy on a
/// rejection, 500 with generic copy when the store or signer failed.
/// A body that is not a JSON `{email, password}` object is a credentials
/// rejection like any other.
pub async fn sign_in(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    jar: CookieJar,
    body: Result<Json<SignInRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let kind = parse_kind(&kind)?;
    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => {
            debug!(principal_kind = %kind, error = %rejection, "Unreadable sign-in body");
            let surface = map_rejection(RejectionReason::InvalidCredentials);
            return Ok((StatusCode::UNAUTHORIZED, Json(error_body(surface))).into_response());
        }
    };
    let credentials = Credentials::new(req.email, req.password);

    let response = match state.signin_service.sign_in(kind, &credentials).await {
        SignInOutcome::SignedIn(signed_in) => {
            let session = &state.config.session;
            let redirect_to = params
                .get(&session.callback_param)
                .filter(|callback| is_local_path(callback))
                .cloned()
                .unwrap_or_else(|| signed_in.tree.home_path(session).to_string());
            let max_age = state.config.auth.session_ttl_minutes * 60;

            (
                StatusCode::OK,
                jar.add(session_cookie(session, signed_in.token.token, max_age)),
                Json(SignInResponse {
                    success: true,
                    kind: signed_in.tree.as_str().to_string(),
                    redirect_to,
                }),
            )
                .into_response()
        }
        SignInOutcome::Rejected { surface, .. } => {
            (StatusCode::UNAUTHORIZED, Json(error_body(surface))).into_response()
        }
        SignInOutcome::Failed { surface } => {
            (StatusCode::INTERNAL_SERVER_ERROR, Json(error_body(surface))).into_response()
        }
    };

    Ok(response)
}

/// POST /api/auth/signout
pub async fn sign_out(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<ApiResponse<MessageResponse>>) {
    let jar = jar.remove(Cookie::build(state.config.session.cookie_name.clone()).path("/"));
    (
        jar,
        Json(ApiResponse::ok(MessageResponse::new("Signed out"))),
    )
}

fn error_body(surface: ErrorSurface) -> SignInErrorResponse {
    SignInErrorResponse {
        error: surface.category,
        headline: surface.headline,
        message: surface.detail,
    }
}

fn session_cookie(config: &SessionConfig, token: String, max_age_seconds: u64) -> Cookie<'static> {
    let max_age = i64::try_from(max_age_seconds).unwrap_or(i64::MAX);
    Cookie::build((config.cookie_name.clone(), token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.cookie_secure)
        .max_age(time::Duration::seconds(max_age))
        .build()
}

/// Only same-origin absolute paths are followed after sign-in.
fn is_local_path(callback: &str) -> bool {
    callback.starts_with('/') && !callback.starts_with("//") && !callback.contains('\\')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_local_path() {
        assert!(is_local_path("/customer/dashboard?tab=ads"));
        assert!(!is_local_path("//evil.example/phish"));
        assert!(!is_local_path("https://evil.example"));
        assert!(!is_local_path("/\\evil.example"));
        assert!(!is_local_path(""));
    }

    #[test]
    fn test_session_cookie_flags() {
        let mut config = SessionConfig::default();
        let cookie = session_cookie(&config, "tok".to_string(), 60);
        assert_eq!(cookie.name(), "adportal_session");
        assert_eq!(cookie.value(), "tok");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.max_age(), Some(time::Duration::seconds(60)));

        config.cookie_secure = false;
        let rendered = session_cookie(&config, "tok".to_string(), 60).to_string();
        assert!(rendered.contains("HttpOnly"));
        assert!(!rendered.contains("Secure"));
    }
}
