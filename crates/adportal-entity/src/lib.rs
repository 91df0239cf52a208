//! # adportal-entity
//!
//! Domain entity models for the ad portal. Every struct in this crate
//! represents a database record or a domain value object. Principal
//! records carry their role and owning organization resolved, so the
//! authentication layer never performs a second lookup.

pub mod ad_account;
pub mod customer;
pub mod organization;
pub mod principal;
pub mod staff;
pub mod status;
pub mod subcustomer;

pub use principal::{AuthenticatedPrincipal, Credentialed, PrincipalKind};
pub use status::AccountStatus;
