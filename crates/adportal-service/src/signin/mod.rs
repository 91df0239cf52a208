//! Sign-in orchestration.

pub mod service;

pub use service::{SignInOutcome, SignInService, SignedIn};
