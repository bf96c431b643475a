//! Core infrastructure: configuration, constants and logging

pub mod config;
pub mod constants;
pub mod logging;

pub use config::{FileConfig, FilterConfig};
pub use logging::init_logging;
