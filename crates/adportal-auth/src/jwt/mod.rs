//! Session token encoding and decoding.

pub mod decoder;
pub mod encoder;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::claims::SessionClaims;

pub use decoder::JwtDecoder;
pub use encoder::{IssuedToken, JwtEncoder};

/// The signed token payload: session claims plus registered claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// The session claims, flattened into the payload.
    #[serde(flatten)]
    pub session: SessionClaims,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    /// Token identifier.
    pub jti: Uuid,
}
