//! Customer users and their organization-scoped roles.

pub mod model;
pub mod role;

pub use model::{CreateCustomerUser, CustomerUser, NewOwner};
pub use role::{CustomerRole, CustomerRoleName};
