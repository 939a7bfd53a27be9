//! Configuration types

mod app;
mod logging;
mod resolver;

pub use app::AppConfig;
pub use logging::LoggingConfig;
pub use resolver::{DecoratorPolicy, ResolverConfig};
