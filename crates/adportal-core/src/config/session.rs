//! Session cookie and sign-in surface configuration.

use serde::{Deserialize, Serialize};

/// How the session token travels and where unauthenticated users are sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Name of the HTTP-only cookie carrying the session token.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Whether the cookie is marked `Secure`.
    #[serde(default = "default_true")]
    pub cookie_secure: bool,
    /// Query parameter carrying the original path on redirects.
    #[serde(default = "default_callback_param")]
    pub callback_param: String,
    /// Sign-in page for the staff tree.
    #[serde(default = "default_staff_signin")]
    pub staff_signin_path: String,
    /// Sign-in page for the customer tree.
    #[serde(default = "default_customer_signin")]
    pub customer_signin_path: String,
    /// Sign-in page for the sub-customer tree.
    #[serde(default = "default_subcustomer_signin")]
    pub subcustomer_signin_path: String,
    /// Landing page after a staff sign-in.
    #[serde(default = "default_staff_home")]
    pub staff_home_path: String,
    /// Landing page after a customer sign-in.
    #[serde(default = "default_customer_home")]
    pub customer_home_path: String,
    /// Landing page after a sub-customer sign-in.
    #[serde(default = "default_subcustomer_home")]
    pub subcustomer_home_path: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            cookie_secure: true,
            callback_param: default_callback_param(),
            staff_signin_path: default_staff_signin(),
            customer_signin_path: default_customer_signin(),
            subcustomer_signin_path: default_subcustomer_signin(),
            staff_home_path: default_staff_home(),
            customer_home_path: default_customer_home(),
            subcustomer_home_path: default_subcustomer_home(),
        }
    }
}

fn default_cookie_name() -> String {
    "adportal_session".to_string()
}

fn default_true() -> bool {
    true
}

fn default_callback_param() -> String {
    "callbackUrl".to_string()
}

fn default_staff_signin() -> String {
    "/auth/staff/signin".to_string()
}

fn default_customer_signin() -> String {
    "/auth/customer/signin".to_string()
}

fn default_subcustomer_signin() -> String {
    "/auth/subcustomer/signin".to_string()
}

fn default_staff_home() -> String {
    "/staff/dashboard".to_string()
}

fn default_customer_home() -> String {
    "/customer/dashboard".to_string()
}

fn default_subcustomer_home() -> String {
    "/subcustomer/dashboard".to_string()
}
