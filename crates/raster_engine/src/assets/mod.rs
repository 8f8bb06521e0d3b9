//! Asset handles and lookup

pub mod resource_manager;

pub use resource_manager::{ResourceError, ResourceManager};
