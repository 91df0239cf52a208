//! Runs one sign-in attempt end to end: authenticate, build claims, sign.

use std::sync::Arc;

use tracing::{error, info};

use adportal_auth::jwt::IssuedToken;
use adportal_auth::{
    AuthResult, CredentialAuthenticator, Credentials, ErrorSurface, JwtEncoder, RejectionReason,
    RouteTree, SessionClaims, build_claims, map_rejection,
};
use adportal_entity::PrincipalKind;

/// A successful sign-in.
#[derive(Debug, Clone)]
pub struct SignedIn {
    /// The signed session token.
    pub token: IssuedToken,
    /// Claims inside the token.
    pub claims: SessionClaims,
    /// The tree the principal lands in.
    pub tree: RouteTree,
}

/// What the HTTP layer needs to answer a sign-in request.
#[derive(Debug, Clone)]
pub enum SignInOutcome {
    /// Credentials and every status gate passed.
    SignedIn(Box<SignedIn>),
    /// An expected rejection, already mapped for display.
    Rejected {
        /// Internal reason; logged, never sent.
        reason: RejectionReason,
        /// What the client is shown.
        surface: ErrorSurface,
    },
    /// The store, hashing pool or signer failed.
    Failed {
        /// Generic retry copy.
        surface: ErrorSurface,
    },
}

/// Sign-in use case shared by the three sign-in endpoints.
#[derive(Debug, Clone)]
pub struct SignInService {
    authenticator: Arc<CredentialAuthenticator>,
    encoder: Arc<JwtEncoder>,
}

impl SignInService {
    /// Creates a new sign-in service.
    pub fn new(authenticator: Arc<CredentialAuthenticator>, encoder: Arc<JwtEncoder>) -> Self {
        Self {
            authenticator,
            encoder,
        }
    }

    /// Authenticates a submission for one principal kind and signs a session.
    pub async fn sign_in(&self, kind: PrincipalKind, credentials: &Credentials) -> SignInOutcome {
        let result = match self.authenticator.authenticate(kind, credentials).await {
            Ok(result) => result,
            Err(e) => {
                error!(principal_kind = %kind, error = %e, "Sign-in failed on infrastructure error");
                return SignInOutcome::Failed {
                    surface: ErrorSurface::server(),
                };
            }
        };

        let principal = match result {
            AuthResult::Success(principal) => principal,
            AuthResult::Rejected { reason } => {
                info!(principal_kind = %kind, reason = %reason, "Sign-in rejected");
                return SignInOutcome::Rejected {
                    reason,
                    surface: map_rejection(reason),
                };
            }
        };

        let claims = build_claims(&principal);
        let token = match self.encoder.issue(&claims) {
            Ok(token) => token,
            Err(e) => {
                error!(
                    principal_kind = %kind,
                    principal_id = %claims.principal_id,
                    error = %e,
                    "Failed to sign session token"
                );
                return SignInOutcome::Failed {
                    surface: ErrorSurface::server(),
                };
            }
        };

        info!(
            principal_kind = %kind,
            principal_id = %claims.principal_id,
            organization_id = ?claims.organization_id,
            "Signed in"
        );

        SignInOutcome::SignedIn(Box::new(SignedIn {
            token,
            claims,
            tree: RouteTree::for_kind(kind),
        }))
    }
}
