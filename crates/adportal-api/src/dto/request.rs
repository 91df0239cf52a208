//! Request DTOs.
//!
//! Provisioning and ad-account bodies are deserialized straight into the
//! service request types, which carry their own validation.

use serde::Deserialize;

use adportal_entity::AccountStatus;

/// Sign-in form body, shared by the three sign-in endpoints.
#[derive(Clone, Deserialize)]
pub struct SignInRequest {
    /// Email address as typed.
    #[serde(default)]
    pub email: String,
    /// Password as typed.
    #[serde(default)]
    pub password: String,
}

impl std::fmt::Debug for SignInRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignInRequest").finish_non_exhaustive()
    }
}

/// Status change body for organizations and principals.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct StatusChangeRequest {
    /// New status.
    pub status: AccountStatus,
}
