//! Root configuration

use serde::{Deserialize, Serialize};

use super::{LoggingConfig, ResolverConfig};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Resolution engine settings
    pub resolver: ResolverConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}
