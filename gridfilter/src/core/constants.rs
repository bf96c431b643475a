// =============================================================================
// Application Identity
// =============================================================================

/// Crate name in lowercase (for log targets and identifiers)
pub const APP_NAME_LOWER: &str = "gridfilter";

// =============================================================================
// Configuration Files
// =============================================================================

/// Config file name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "gridfilter.json";

/// Environment variable for config file path
pub const ENV_CONFIG: &str = "GRIDFILTER_CONFIG";

// =============================================================================
// Environment Variables - Logging
// =============================================================================

/// Environment variable for the log filter (falls back to RUST_LOG)
pub const ENV_LOG: &str = "GRIDFILTER_LOG";

// =============================================================================
// Environment Variables - Limits
// =============================================================================

/// Environment variable overriding the maximum filter tree depth
pub const ENV_MAX_DEPTH: &str = "GRIDFILTER_MAX_DEPTH";

/// Environment variable overriding the maximum number of leaf filters
pub const ENV_MAX_LEAVES: &str = "GRIDFILTER_MAX_LEAVES";

// =============================================================================
// Filter Limits
// =============================================================================

/// Maximum size of filter JSON in bytes (64KB)
pub const MAX_FILTER_JSON_SIZE: usize = 64 * 1024;

/// Default maximum number of leaf filters in one tree
pub const DEFAULT_MAX_FILTERS: usize = 50;

/// Default maximum nesting depth of a filter tree
pub const DEFAULT_MAX_FILTER_DEPTH: usize = 16;
