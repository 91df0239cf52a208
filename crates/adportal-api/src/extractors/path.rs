//! Typed path parameter helpers.

use adportal_core::error::AppError;
use adportal_entity::PrincipalKind;

/// Parses a principal kind from a path segment.
pub fn parse_kind(s: &str) -> Result<PrincipalKind, AppError> {
    s.parse::<PrincipalKind>()
        .map_err(|_| AppError::not_found(format!("Unknown principal kind: {s}")))
}
