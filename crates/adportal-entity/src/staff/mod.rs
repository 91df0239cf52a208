//! Platform staff principals and their roles.

pub mod model;
pub mod role;

pub use model::{CreateStaff, StaffPrincipal};
pub use role::{StaffRole, StaffRoleName};
