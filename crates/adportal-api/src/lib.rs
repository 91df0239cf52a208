//! # adportal-api
//!
//! HTTP API layer for the ad portal built on Axum.
//!
//! Provides the sign-in/sign-out endpoints, one guard middleware per
//! tenant route tree, the staff, customer and sub-customer routes, and
//! the mapping from `AppError` to HTTP responses.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, serve};
pub use error::ApiError;
pub use state::AppState;
