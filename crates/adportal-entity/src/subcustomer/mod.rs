//! Sub-customer principals.

pub mod model;

pub use model::{CreateSubCustomer, SubCustomer};
