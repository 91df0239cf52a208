//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Credential and token configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for session token signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Fixed session token lifetime in minutes.
    #[serde(default = "default_session_ttl")]
    pub session_ttl_minutes: u64,
    /// Minimum password length accepted at provisioning time.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Argon2 memory cost in KiB for newly hashed passwords.
    #[serde(default = "default_hash_memory")]
    pub hash_memory_kib: u32,
    /// Argon2 iteration count for newly hashed passwords.
    #[serde(default = "default_hash_iterations")]
    pub hash_iterations: u32,
    /// Argon2 lane count for newly hashed passwords.
    #[serde(default = "default_hash_parallelism")]
    pub hash_parallelism: u32,
    /// Sign-in rate limiting.
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            session_ttl_minutes: default_session_ttl(),
            password_min_length: default_password_min(),
            hash_memory_kib: default_hash_memory(),
            hash_iterations: default_hash_iterations(),
            hash_parallelism: default_hash_parallelism(),
            rate_limit: RateLimitConfig::default(),
        }
    }
}

/// Token-bucket limiter wrapped around the sign-in endpoints only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Whether sign-in attempts are rate limited.
    #[serde(default)]
    pub enabled: bool,
    /// Bucket size per client address.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Tokens refilled per second.
    #[serde(default = "default_refill")]
    pub refill_per_second: f64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            max_attempts: default_max_attempts(),
            refill_per_second: default_refill(),
        }
    }
}

/// Shipped signing secret. Only accepted in `development` and `test`.
pub const PLACEHOLDER_JWT_SECRET: &str = "CHANGE_ME_IN_PRODUCTION";

/// Shortest signing secret accepted outside `development` and `test`.
pub const MIN_JWT_SECRET_BYTES: usize = 32;

fn default_jwt_secret() -> String {
    PLACEHOLDER_JWT_SECRET.to_string()
}

fn default_session_ttl() -> u64 {
    480
}

fn default_password_min() -> usize {
    8
}

fn default_hash_memory() -> u32 {
    19 * 1024
}

fn default_hash_iterations() -> u32 {
    2
}

fn default_hash_parallelism() -> u32 {
    1
}

fn default_max_attempts() -> u32 {
    10
}

fn default_refill() -> f64 {
    0.2
}
