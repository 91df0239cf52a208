//! Organization provisioning and administration.

pub mod request;
pub mod service;

pub use request::{ProvisionOrganizationRequest, UpdateOrganizationRequest};
pub use service::{OrganizationService, ProvisionedOrganization};
