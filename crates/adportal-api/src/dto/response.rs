//! Response DTOs.

use serde::{Deserialize, Serialize};

use adportal_auth::ErrorCategory;
use adportal_entity::customer::CustomerUser;
use adportal_entity::organization::Organization;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Successful sign-in. The token itself only travels in the cookie.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInResponse {
    /// Always `true`.
    pub success: bool,
    /// Tree the principal signed in to.
    pub kind: String,
    /// Where the client should navigate next.
    pub redirect_to: String,
}

/// Failed sign-in, already mapped to display copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInErrorResponse {
    /// Failure class.
    pub error: ErrorCategory,
    /// Short title.
    pub headline: String,
    /// Explanation and next step.
    pub message: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status string.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Uptime in seconds.
    pub uptime_seconds: u64,
    /// Database state: `connected`, `unreachable` or `memory`.
    pub database: String,
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message text.
    pub message: String,
}

impl MessageResponse {
    /// Creates a message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// An organization with its customer users.
#[derive(Debug, Clone, Serialize)]
pub struct OrganizationDetail {
    /// The organization.
    pub organization: Organization,
    /// Its customer users.
    pub members: Vec<CustomerUser>,
}
