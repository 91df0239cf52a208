//! Connected advertising-platform accounts.

pub mod model;
pub mod platform;

pub use model::{ConnectedAdAccount, CreateAdAccount};
pub use platform::AdPlatform;
