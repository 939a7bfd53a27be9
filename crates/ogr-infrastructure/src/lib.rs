// Clippy allows for patterns used across the resolver
#![allow(clippy::collapsible_if)]

//! # Infrastructure Layer
//!
//! The resolution engine plus the cross-cutting concerns around it.
//!
//! ### Resolution
//! | Module | Description |
//! |--------|-------------|
//! | [`di`] | Registry, registration table, resolution sessions |
//!
//! ### Configuration
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | TOML/env configuration via Figment |
//! | [`constants`] | Centralized configuration constants |
//!
//! ### Observability & Errors
//! | Module | Description |
//! |--------|-------------|
//! | [`logging`] | Structured logging with tracing |
//! | [`error_ext`] | Context helpers mapping foreign errors to domain errors |

pub mod config;
pub mod constants;
pub mod di;
pub mod error_ext;
pub mod logging;

// Re-export commonly used types
pub use di::{ResolutionSession, ResolverRegistry};
pub use error_ext::ErrorContext;
