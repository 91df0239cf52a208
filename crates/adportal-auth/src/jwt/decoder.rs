//! Session token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use adportal_core::config::auth::AuthConfig;
use adportal_core::error::AppError;

use super::TokenClaims;

/// Clock skew tolerated when checking `exp`.
pub const EXPIRY_LEEWAY_SECONDS: u64 = 5;

/// Validates session token signature and expiry.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = EXPIRY_LEEWAY_SECONDS;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates a session token.
    pub fn decode(&self, token: &str) -> Result<TokenClaims, AppError> {
        decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::authentication("Session has expired")
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::authentication("Invalid session signature")
                }
                _ => AppError::authentication(format!("Invalid session token: {e}")),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claims::build_claims;
    use crate::claims::tests::{customer_user, staff, sub_customer};
    use crate::jwt::JwtEncoder;
    use adportal_core::ErrorKind;
    use jsonwebtoken::{EncodingKey, Header, encode};

    fn config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret-for-session-tokens".to_string(),
            ..AuthConfig::default()
        }
    }

    #[test]
    fn test_claims_survive_sign_and_decode() {
        let encoder = JwtEncoder::new(&config());
        let decoder = JwtDecoder::new(&config());
        for principal in [staff(), customer_user(), sub_customer()] {
            let claims = build_claims(&principal);
            let issued = encoder.issue(&claims).unwrap();
            let decoded = decoder.decode(&issued.token).unwrap();
            assert_eq!(decoded.session, claims);
            assert_eq!(decoded.jti, issued.jti);
            assert_eq!(decoded.exp - decoded.iat, 480 * 60);
        }
    }

    #[test]
    fn test_rejects_foreign_signature() {
        let encoder = JwtEncoder::new(&AuthConfig {
            jwt_secret: "some-other-secret".to_string(),
            ..AuthConfig::default()
        });
        let issued = encoder.issue(&build_claims(&staff())).unwrap();
        let err = JwtDecoder::new(&config()).decode(&issued.token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authentication);
    }

    #[test]
    fn test_rejects_expired_token() {
        let now = chrono::Utc::now().timestamp();
        let claims = TokenClaims {
            session: build_claims(&staff()),
            iat: now - 7200,
            exp: now - 3600,
            jti: uuid::Uuid::new_v4(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config().jwt_secret.as_bytes()),
        )
        .unwrap();
        let err = JwtDecoder::new(&config()).decode(&token).unwrap_err();
        assert_eq!(err.message, "Session has expired");
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(JwtDecoder::new(&config()).decode("not-a-token").is_err());
    }
}
