//! Infrastructure layer constants
//!
//! Resolver defaults live in `ogr_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "ogr.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "ogr";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "OGR";

/// Separator between nested keys in environment variable names
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the configured log filter
pub const LOG_FILTER_ENV: &str = "OGR_LOG";

/// File name prefix for rolling log files
pub const LOG_FILE_PREFIX: &str = "ogr";
