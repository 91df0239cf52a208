//! `AuthPrincipal` extractor: the context the guard middleware attached.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use adportal_core::error::AppError;
use adportal_service::RequestContext;

use crate::error::ApiError;

/// The signed-in principal for a guarded route.
///
/// Only available behind one of the tree guards; a handler mounted
/// outside them gets an authentication error instead.
#[derive(Debug, Clone)]
pub struct AuthPrincipal(pub RequestContext);

impl AuthPrincipal {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthPrincipal {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S> FromRequestParts<S> for AuthPrincipal
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestContext>()
            .cloned()
            .map(AuthPrincipal)
            .ok_or_else(|| AppError::authentication("Not signed in").into())
    }
}
