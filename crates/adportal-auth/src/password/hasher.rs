//! Argon2id password hashing with bcrypt verification support.
//!
//! New hashes are always argon2id. Verification also accepts bcrypt
//! (`$2a$`, `$2b$`, `$2y$`) so imported bcrypt credentials keep working.

use std::sync::Arc;

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};
use tracing::warn;

use adportal_core::config::auth::AuthConfig;
use adportal_core::error::AppError;

/// Input hashed once at construction to produce the dummy hash.
const DUMMY_PASSWORD: &str = "adportal-dummy-password";

/// Handles password hashing and verification.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: Params,
    /// Hash verified against when no record matched, so that path costs the same.
    dummy_hash: Arc<str>,
}

impl PasswordHasher {
    /// Creates a hasher using the argon2 cost from configuration.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        let params = Params::new(
            config.hash_memory_kib,
            config.hash_iterations,
            config.hash_parallelism,
            None,
        )
        .map_err(|e| AppError::configuration(format!("Invalid argon2 parameters: {e}")))?;

        let mut hasher = Self {
            params,
            dummy_hash: Arc::from(""),
        };
        hasher.dummy_hash = Arc::from(hasher.hash_password(DUMMY_PASSWORD)?);
        Ok(hasher)
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hashes a plaintext password using Argon2id with a random salt.
    pub fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;
        Ok(hash.to_string())
    }

    /// Verifies a plaintext password against a stored argon2 or bcrypt hash.
    ///
    /// A hash in an unknown or corrupt format never matches.
    pub fn verify_password(&self, password: &str, hash: &str) -> bool {
        if hash.starts_with("$argon2") {
            let parsed = match PasswordHash::new(hash) {
                Ok(parsed) => parsed,
                Err(e) => {
                    warn!(error = %e, "Stored argon2 hash is malformed");
                    return false;
                }
            };
            return self
                .argon2()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok();
        }

        if hash.starts_with("$2") {
            return match bcrypt::verify(password, hash) {
                Ok(matches) => matches,
                Err(e) => {
                    warn!(error = %e, "Stored bcrypt hash is malformed");
                    false
                }
            };
        }

        warn!("Stored password hash has an unsupported format");
        false
    }

    /// Hashes on the blocking pool.
    pub async fn hash_password_blocking(&self, password: String) -> Result<String, AppError> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.hash_password(&password))
            .await
            .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))?
    }

    /// Verifies on the blocking pool.
    pub async fn verify_password_blocking(
        &self,
        password: String,
        hash: String,
    ) -> Result<bool, AppError> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.verify_password(&password, &hash))
            .await
            .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))
    }

    /// Performs a verification whose result is discarded.
    pub async fn verify_dummy(&self, password: String) -> Result<(), AppError> {
        let hash = self.dummy_hash.to_string();
        self.verify_password_blocking(password, hash).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_config() -> AuthConfig {
        AuthConfig {
            hash_memory_kib: 1024,
            hash_iterations: 1,
            hash_parallelism: 1,
            ..AuthConfig::default()
        }
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new(&fast_config()).unwrap();
        let hash = hasher.hash_password("password").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify_password("password", &hash));
        assert!(!hasher.verify_password("wrongpass", &hash));
    }

    #[test]
    fn test_verifies_bcrypt_hashes() {
        let hasher = PasswordHasher::new(&fast_config()).unwrap();
        let hash = bcrypt::hash("password", 4).unwrap();
        assert!(hasher.verify_password("password", &hash));
        assert!(!hasher.verify_password("wrongpass", &hash));
    }

    #[test]
    fn test_unknown_format_never_matches() {
        let hasher = PasswordHasher::new(&fast_config()).unwrap();
        assert!(!hasher.verify_password("password", "password"));
        assert!(!hasher.verify_password("password", "$argon2id$garbage"));
    }

    #[test]
    fn test_rejects_invalid_params() {
        let config = AuthConfig {
            hash_iterations: 0,
            ..fast_config()
        };
        assert!(PasswordHasher::new(&config).is_err());
    }

    #[tokio::test]
    async fn test_blocking_variants() {
        let hasher = PasswordHasher::new(&fast_config()).unwrap();
        let hash = hasher
            .hash_password_blocking("password".to_string())
            .await
            .unwrap();
        assert!(
            hasher
                .verify_password_blocking("password".to_string(), hash)
                .await
                .unwrap()
        );
        hasher.verify_dummy("anything".to_string()).await.unwrap();
    }
}
