//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section; every field has a default so an empty file is a valid config.

pub mod app;
pub mod auth;
pub mod database;
pub mod logging;
pub mod session;

use serde::{Deserialize, Serialize};

use self::app::ServerConfig;
use self::auth::AuthConfig;
use self::database::DatabaseConfig;
use self::logging::LoggingConfig;
use self::session::SessionConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Credential and token settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Session cookie and sign-in page settings.
    #[serde(default)]
    pub session: SessionConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges the default configuration with an environment-specific overlay
    /// and environment variables prefixed with `ADPORTAL__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("ADPORTAL")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let loaded: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;
        loaded.validate_for_env(env)?;
        Ok(loaded)
    }

    /// Parse a configuration from a TOML string.
    pub fn from_toml_str(raw: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(raw, config::FileFormat::Toml))
            .build()?;
        let loaded: Self = config.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// [`validate`](Self::validate), plus a strong signing secret outside
    /// `development` and `test`.
    pub fn validate_for_env(&self, env: &str) -> Result<(), AppError> {
        self.validate()?;
        if matches!(env, "development" | "test") {
            return Ok(());
        }
        let secret = self.auth.jwt_secret.trim();
        if secret == auth::PLACEHOLDER_JWT_SECRET {
            return Err(AppError::configuration(format!(
                "auth.jwt_secret is still the shipped placeholder; set ADPORTAL__AUTH__JWT_SECRET for the '{env}' environment"
            )));
        }
        if secret.len() < auth::MIN_JWT_SECRET_BYTES {
            return Err(AppError::configuration(format!(
                "auth.jwt_secret must be at least {} bytes in the '{env}' environment",
                auth::MIN_JWT_SECRET_BYTES
            )));
        }
        Ok(())
    }

    /// Reject settings the server cannot run with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.auth.jwt_secret.trim().is_empty() {
            return Err(AppError::configuration("auth.jwt_secret must not be empty"));
        }
        if self.auth.session_ttl_minutes == 0 {
            return Err(AppError::configuration(
                "auth.session_ttl_minutes must be greater than zero",
            ));
        }
        if self.auth.rate_limit.enabled && self.auth.rate_limit.max_attempts == 0 {
            return Err(AppError::configuration(
                "auth.rate_limit.max_attempts must be greater than zero",
            ));
        }
        Ok(())
    }
}
