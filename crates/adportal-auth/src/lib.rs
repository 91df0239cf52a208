//! # adportal-auth
//!
//! Credential authentication and tenant scoping for the ad portal.
//!
//! ## Modules
//!
//! - `authenticator`: one generic email/password decision procedure,
//!   instantiated per principal kind
//! - `claims`: maps an authenticated principal to session claims
//! - `jwt`: signs and verifies session tokens
//! - `revocation`: organization/principal revocation list checked by the guard
//! - `guard`: per-request tenant tree check and sign-in redirects
//! - `surface`: maps rejections to user-facing copy
//! - `password`: argon2id hashing with bcrypt verification support

pub mod authenticator;
pub mod claims;
pub mod guard;
pub mod jwt;
pub mod password;
pub mod revocation;
pub mod surface;

pub use authenticator::{
    AuthResult, Authenticator, CredentialAuthenticator, Credentials, PrincipalDirectory,
    RejectionReason,
};
pub use claims::{SessionClaims, build_claims};
pub use guard::{GuardDecision, RouteGuard, RouteTree};
pub use jwt::{JwtDecoder, JwtEncoder, TokenClaims};
pub use password::PasswordHasher;
pub use revocation::RevocationList;
pub use surface::{ErrorCategory, ErrorSurface, map_rejection};
