//! Logging utilities

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system from the environment (`RUST_LOG`).
pub fn init() {
    env_logger::init();
}

/// Initialize with a default filter; `RUST_LOG` still takes precedence.
pub fn init_with_filter(filter: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();
}
