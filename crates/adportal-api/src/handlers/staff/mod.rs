//! Staff tree handlers.

pub mod organizations;
pub mod principals;
