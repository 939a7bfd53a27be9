//! # ogr - Object Graph Resolver
//!
//! Builds long-lived object graphs from registered factories. Each service
//! type has at most one primary factory and any number of decorators; one
//! `get` call builds every type at most once and reports every instance it
//! built.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use ogr::{Result, ResolverRegistry};
//!
//! trait Greeter: Send + Sync {
//!     fn greet(&self) -> String;
//! }
//!
//! struct Plain;
//! impl Greeter for Plain {
//!     fn greet(&self) -> String {
//!         "hello".to_string()
//!     }
//! }
//!
//! struct Shouting(Arc<dyn Greeter>);
//! impl Greeter for Shouting {
//!     fn greet(&self) -> String {
//!         self.0.greet().to_uppercase()
//!     }
//! }
//!
//! fn main() -> Result<()> {
//!     let mut registry = ResolverRegistry::new();
//!     registry
//!         .register(|_| Ok(Arc::new(Plain) as Arc<dyn Greeter>))?
//!         .decorate(|session| {
//!             let inner = session.resolve::<dyn Greeter>()?;
//!             Ok(Arc::new(Shouting(inner)) as Arc<dyn Greeter>)
//!         })?;
//!
//!     let result = registry.get::<dyn Greeter>()?;
//!     assert_eq!(result.instance().greet(), "HELLO");
//!     assert_eq!(result.tracked().len(), 2);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - `domain` - service keys, resolved instances, errors
//! - `infrastructure` - resolution engine, configuration, logging

/// Domain layer - service keys, instances and errors
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use ogr_domain::*;
}

/// Infrastructure layer - resolver, config and logging
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use ogr_infrastructure::*;
}

// Re-export commonly used domain types at the crate root
pub use domain::*;

// Re-export the resolver entry points at the crate root
pub use infrastructure::config::{AppConfig, ConfigLoader, DecoratorPolicy, ResolverConfig};
pub use infrastructure::di::{RegistrationKind, ResolutionSession, ResolverRegistry};
pub use infrastructure::error_ext::ErrorContext;
pub use infrastructure::logging::init_logging;

/// Build a registry configured from `ogr.toml` and `OGR_*` environment variables
///
/// Logging is left untouched; call [`init_logging`] with
/// `AppConfig::logging` if the host has not installed a subscriber.
pub fn registry_from_environment() -> Result<(ResolverRegistry, AppConfig)> {
    let config = ConfigLoader::new().load()?;
    let registry = ResolverRegistry::with_config(config.resolver.clone())?;
    Ok((registry, config))
}
