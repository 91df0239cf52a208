//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::{Duration, Instant};

use adportal_auth::{
    CredentialAuthenticator, JwtDecoder, JwtEncoder, PasswordHasher, RevocationList, RouteGuard,
};
use adportal_core::config::AppConfig;
use adportal_core::error::AppError;
use adportal_database::{CredentialStore, DatabasePool};
use adportal_service::{
    AdAccountService, OrganizationService, PrincipalAdminService, SignInService,
};

use crate::middleware::rate_limit::RateLimiter;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Process start, for uptime reporting
    pub started_at: Instant,

    // ── Infrastructure ───────────────────────────────────────
    /// Credential store
    pub store: Arc<dyn CredentialStore>,
    /// Database pool, absent when running on the in-memory store
    pub db: Option<DatabasePool>,

    // ── Auth ─────────────────────────────────────────────────
    /// Password hasher
    pub hasher: Arc<PasswordHasher>,
    /// Session token revocations
    pub revocations: Arc<RevocationList>,
    /// Route guard shared by the three tenant trees
    pub guard: Arc<RouteGuard>,
    /// Sign-in rate limiter, when enabled
    pub rate_limiter: Option<RateLimiter>,

    // ── Services ─────────────────────────────────────────────
    /// Sign-in orchestration
    pub signin_service: Arc<SignInService>,
    /// Organization provisioning and administration
    pub organization_service: Arc<OrganizationService>,
    /// Principal status administration
    pub principal_service: Arc<PrincipalAdminService>,
    /// Connected ad accounts
    pub ad_account_service: Arc<AdAccountService>,
}

impl AppState {
    /// Wires the auth components and services over a credential store.
    pub fn new(
        config: AppConfig,
        store: Arc<dyn CredentialStore>,
        db: Option<DatabasePool>,
    ) -> Result<Self, AppError> {
        let hasher = Arc::new(PasswordHasher::new(&config.auth)?);
        let encoder = Arc::new(JwtEncoder::new(&config.auth));
        let decoder = Arc::new(JwtDecoder::new(&config.auth));
        let revocations = Arc::new(RevocationList::new(Duration::from_secs(
            config.auth.session_ttl_minutes * 60,
        )));
        let guard = Arc::new(RouteGuard::new(
            decoder,
            Arc::clone(&revocations),
            config.session.clone(),
        ));

        let rate_limit = &config.auth.rate_limit;
        let rate_limiter = rate_limit
            .enabled
            .then(|| RateLimiter::new(rate_limit.max_attempts, rate_limit.refill_per_second));

        let authenticator = Arc::new(CredentialAuthenticator::new(
            Arc::clone(&store),
            Arc::clone(&hasher),
        ));
        let signin_service = Arc::new(SignInService::new(authenticator, encoder));
        let organization_service = Arc::new(OrganizationService::new(
            Arc::clone(&store),
            Arc::clone(&hasher),
            Arc::clone(&revocations),
            &config.auth,
        ));
        let principal_service = Arc::new(PrincipalAdminService::new(
            Arc::clone(&store),
            Arc::clone(&hasher),
            Arc::clone(&revocations),
        ));
        let ad_account_service = Arc::new(AdAccountService::new(Arc::clone(&store)));

        Ok(Self {
            config: Arc::new(config),
            started_at: Instant::now(),
            store,
            db,
            hasher,
            revocations,
            guard,
            rate_limiter,
            signin_service,
            organization_service,
            principal_service,
            ad_account_service,
        })
    }
}
