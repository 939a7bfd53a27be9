//! Resolver configuration types

use ogr_domain::constants::DEFAULT_MAX_RESOLUTION_DEPTH;
use ogr_domain::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// How the session treats a decorator that does not request its own type exactly once
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DecoratorPolicy {
    /// Fail the resolution with `Error::DecoratorContract`
    #[default]
    Strict,
    /// Log a warning and keep the decorator's instance
    Lenient,
}

/// Resolution engine configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ResolverConfig {
    /// Maximum number of nested in-flight resolutions per session
    pub max_depth: usize,

    /// Decorator self-reference checking
    pub decorator_policy: DecoratorPolicy,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_RESOLUTION_DEPTH,
            decorator_policy: DecoratorPolicy::default(),
        }
    }
}

impl ResolverConfig {
    /// Reject settings under which no resolution could succeed
    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(Error::configuration("Resolver max_depth cannot be 0"));
        }
        Ok(())
    }
}
