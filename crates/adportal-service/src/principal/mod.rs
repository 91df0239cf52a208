//! Status administration for individual principals.

pub mod admin;

pub use admin::{CreateStaffRequest, PrincipalAdminService, PrincipalStatus};
