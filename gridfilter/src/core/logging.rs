//! Logging setup

use tracing_subscriber::EnvFilter;

use super::constants::{APP_NAME_LOWER, ENV_LOG};

/// Filter directive used when neither GRIDFILTER_LOG nor RUST_LOG is set
pub fn default_log_filter() -> String {
    format!("info,{}=info", APP_NAME_LOWER)
}

/// Resolve the active filter directive from the environment
pub fn log_filter_from_env() -> String {
    std::env::var(ENV_LOG)
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| default_log_filter())
}

/// Install a compact fmt subscriber for hosts that have none
///
/// Returns false when a global subscriber is already installed.
pub fn init_logging() -> bool {
    let filter = EnvFilter::try_new(log_filter_from_env())
        .unwrap_or_else(|_| EnvFilter::new(default_log_filter()));

    tracing_subscriber::fmt()
        .with_target(false)
        .with_thread_ids(false)
        .with_level(true)
        .compact()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}
