//! Axum middleware stack.

pub mod cors;
pub mod guard;
pub mod logging;
pub mod rate_limit;
