//! Core utilities: configuration and logging

pub mod config;
pub mod logging;

// Re-exports for convenience
pub use config::{Config, ConfigError};
pub use logging::init_logger;
