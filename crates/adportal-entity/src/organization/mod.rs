//! Customer organizations (tenants).

pub mod model;

pub use model::{CreateOrganization, Organization, UpdateOrganization};
