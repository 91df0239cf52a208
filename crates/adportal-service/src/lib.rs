//! # adportal-service
//!
//! Use cases sitting between the HTTP surface and the credential store.
//! Every mutating operation takes a [`RequestContext`] and re-checks the
//! caller's role itself; the route guard alone is never trusted for that.

pub mod ad_account;
pub mod context;
pub mod organization;
pub mod principal;
pub mod signin;
mod validation;

pub use ad_account::{AdAccountService, ConnectAdAccountRequest};
pub use context::RequestContext;
pub use organization::{
    OrganizationService, ProvisionOrganizationRequest, ProvisionedOrganization,
    UpdateOrganizationRequest,
};
pub use principal::{CreateStaffRequest, PrincipalAdminService, PrincipalStatus};
pub use signin::{SignInOutcome, SignInService};

#[cfg(test)]
pub(crate) mod testing;
