//! Route handlers organized by tree.

pub mod auth;
pub mod customer;
pub mod health;
pub mod staff;
pub mod subcustomer;
