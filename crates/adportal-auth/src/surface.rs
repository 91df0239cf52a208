//! User-facing copy for sign-in failures.
//!
//! This is the only place a rejection reason is turned into something a
//! client sees. Credential failures stay generic; operator-caused statuses
//! get a specific, actionable message.

use serde::{Deserialize, Serialize};

use crate::authenticator::RejectionReason;

/// Coarse class of a sign-in failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    /// Something about the submitted credentials or the account.
    Credentials,
    /// The server failed.
    Server,
}

/// What the client is shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorSurface {
    /// Failure class.
    pub category: ErrorCategory,
    /// Short title.
    pub headline: String,
    /// Explanation and next step.
    pub detail: String,
}

impl ErrorSurface {
    fn new(category: ErrorCategory, headline: &str, detail: &str) -> Self {
        Self {
            category,
            headline: headline.to_string(),
            detail: detail.to_string(),
        }
    }

    /// Copy for an infrastructure failure during sign-in.
    pub fn server() -> Self {
        Self::new(
            ErrorCategory::Server,
            "Something went wrong",
            "We couldn't sign you in right now. Please try again later.",
        )
    }
}

/// Map a rejection reason to display copy.
pub fn map_rejection(reason: RejectionReason) -> ErrorSurface {
    use ErrorCategory::Credentials;

    match reason {
        RejectionReason::InvalidCredentials => ErrorSurface::new(
            Credentials,
            "Invalid email or password",
            "Check your email and password and try again.",
        ),
        RejectionReason::AccountInactive => ErrorSurface::new(
            Credentials,
            "Account disabled",
            "Your account is temporarily disabled. Please contact support.",
        ),
        RejectionReason::AccountSuspended => ErrorSurface::new(
            Credentials,
            "Account suspended",
            "Your account has been suspended. Please contact support.",
        ),
        RejectionReason::AccountPending => ErrorSurface::new(
            Credentials,
            "Account pending approval",
            "Your account is pending approval. You will be able to sign in once it is approved.",
        ),
        RejectionReason::OrganizationInactive => ErrorSurface::new(
            Credentials,
            "Organization disabled",
            "Your organization's account is temporarily disabled. Please contact support.",
        ),
        RejectionReason::OrganizationSuspended => ErrorSurface::new(
            Credentials,
            "Organization suspended",
            "Your organization's account has been suspended. Please contact support.",
        ),
        RejectionReason::OrganizationPending => ErrorSurface::new(
            Credentials,
            "Organization pending approval",
            "Your organization's account is pending approval. Please contact support.",
        ),
    }
}
