//! # adportal-database
//!
//! The credential store: async store traits, their PostgreSQL
//! implementation built from per-table repositories, and an in-memory
//! implementation with identical lookup semantics.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod seed;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use repositories::PgStore;
pub use store::{
    AdAccountStore, CredentialStore, CustomerUserStore, OrganizationStore, StaffStore,
    SubCustomerStore,
};
