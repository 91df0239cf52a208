//! Connected advertising accounts of an organization.

pub mod service;

pub use service::{AdAccountService, ConnectAdAccountRequest};
