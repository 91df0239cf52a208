//! Route guard for the tenant-scoped route trees.
//!
//! The guard is a pure decision over the presented token: it never touches
//! the credential store. A missing, invalid, expired or revoked token and
//! a token for the wrong tree all produce the same redirect to that tree's
//! sign-in page.

use std::fmt;
use std::sync::Arc;

use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use tracing::debug;

use adportal_core::config::session::SessionConfig;
use adportal_entity::PrincipalKind;

use crate::claims::{CUSTOMER_USER_ROLE, SUBCUSTOMER_ROLE, SessionClaims};
use crate::jwt::{JwtDecoder, TokenClaims};
use crate::revocation::RevocationList;

/// A tenant-scoped route tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteTree {
    /// Platform staff area.
    Staff,
    /// Customer organization area.
    Customer,
    /// Sub-customer area.
    SubCustomer,
}

impl RouteTree {
    /// The tree a principal kind signs in to.
    pub fn for_kind(kind: PrincipalKind) -> Self {
        match kind {
            PrincipalKind::Staff => Self::Staff,
            PrincipalKind::CustomerUser => Self::Customer,
            PrincipalKind::SubCustomer => Self::SubCustomer,
        }
    }

    /// Whether the claims belong in this tree.
    pub fn admits(&self, claims: &SessionClaims) -> bool {
        match self {
            Self::Staff => claims.is_staff_role(),
            Self::Customer => {
                claims.organization_id.is_some() && claims.effective_role == CUSTOMER_USER_ROLE
            }
            Self::SubCustomer => {
                claims.organization_id.is_some() && claims.effective_role == SUBCUSTOMER_ROLE
            }
        }
    }

    /// This tree's sign-in page.
    pub fn signin_path<'a>(&self, config: &'a SessionConfig) -> &'a str {
        match self {
            Self::Staff => &config.staff_signin_path,
            Self::Customer => &config.customer_signin_path,
            Self::SubCustomer => &config.subcustomer_signin_path,
        }
    }

    /// This tree's landing page after sign-in.
    pub fn home_path<'a>(&self, config: &'a SessionConfig) -> &'a str {
        match self {
            Self::Staff => &config.staff_home_path,
            Self::Customer => &config.customer_home_path,
            Self::SubCustomer => &config.subcustomer_home_path,
        }
    }

    /// Return the tree as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Staff => "staff",
            Self::Customer => "customer",
            Self::SubCustomer => "subcustomer",
        }
    }
}

impl fmt::Display for RouteTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of guarding one request.
#[derive(Debug, Clone)]
pub enum GuardDecision {
    /// The request may proceed with these claims.
    Allow(TokenClaims),
    /// Send the caller to sign in.
    Redirect {
        /// Sign-in URL with the original path as callback.
        location: String,
    },
}

/// Decides whether a request may enter a route tree.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    decoder: Arc<JwtDecoder>,
    revocations: Arc<RevocationList>,
    session: SessionConfig,
}

impl RouteGuard {
    /// Create a guard.
    pub fn new(
        decoder: Arc<JwtDecoder>,
        revocations: Arc<RevocationList>,
        session: SessionConfig,
    ) -> Self {
        Self {
            decoder,
            revocations,
            session,
        }
    }

    /// Evaluate the presented token against a tree.
    pub async fn evaluate(
        &self,
        tree: RouteTree,
        token: Option<&str>,
        original_path: &str,
    ) -> GuardDecision {
        let redirect = || GuardDecision::Redirect {
            location: self.signin_location(tree, original_path),
        };

        let Some(token) = token.filter(|t| !t.is_empty()) else {
            debug!(tree = %tree, "No session token");
            return redirect();
        };

        let claims = match self.decoder.decode(token) {
            Ok(claims) => claims,
            Err(e) => {
                debug!(tree = %tree, error = %e, "Session token rejected");
                return redirect();
            }
        };

        if !tree.admits(&claims.session) {
            debug!(
                tree = %tree,
                principal_kind = %claims.session.principal_kind,
                "Session belongs to another tree"
            );
            return redirect();
        }

        if self.revocations.is_revoked(&claims).await {
            debug!(
                tree = %tree,
                principal_id = %claims.session.principal_id,
                "Session revoked"
            );
            return redirect();
        }

        GuardDecision::Allow(claims)
    }

    /// Sign-in URL for a tree, carrying the original path.
    pub fn signin_location(&self, tree: RouteTree, original_path: &str) -> String {
        format!(
            "{}?{}={}",
            tree.signin_path(&self.session),
            self.session.callback_param,
            utf8_percent_encode(original_path, NON_ALPHANUMERIC)
        )
    }
}
