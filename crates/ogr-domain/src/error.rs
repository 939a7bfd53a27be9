//! Error handling types

use std::fmt;

use thiserror::Error;

use crate::value_objects::ServiceKey;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Why a service type could not be resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnresolvedReason {
    /// Nothing was ever registered for the type
    NotRegistered,
    /// Every decorator was consumed at this depth and no primary exists
    DecoratorsExhausted {
        /// Decorator depth at which selection came up empty
        depth: usize,
    },
}

impl fmt::Display for UnresolvedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotRegistered => write!(f, "no registration found"),
            Self::DecoratorsExhausted { depth } => {
                write!(f, "decorators exhausted at depth {depth} and no primary registered")
            }
        }
    }
}

/// Main error type for the object graph resolver
#[derive(Error, Debug)]
pub enum Error {
    /// A second primary factory was registered for a type that already has one
    #[error(
        "Duplicate primary registration for {service}: attempted '{attempted}', existing '{existing}'"
    )]
    DuplicatePrimaryRegistration {
        /// The service type being registered
        service: ServiceKey,
        /// Description of the registration already present
        existing: String,
        /// Description of the rejected registration
        attempted: String,
    },

    /// No usable factory for the requested type
    #[error("Unresolved type {service}: {reason}")]
    UnresolvedType {
        /// The service type that could not be resolved
        service: ServiceKey,
        /// Whether the type was never registered or ran out of decorators
        reason: UnresolvedReason,
    },

    /// A factory failed while building an instance
    #[error("Failed to resolve {service} at decorator depth {depth}: {source}\n{registrations}")]
    ResolutionFailure {
        /// The service type whose factory failed
        service: ServiceKey,
        /// Decorator depth that was being built
        depth: usize,
        /// Human-readable listing of all registrations for the type
        registrations: String,
        /// The error raised by the factory
        #[source]
        source: Box<Error>,
    },

    /// A resolution result was assembled from missing parts
    #[error("Invalid resolution result: {message}")]
    InvalidResult {
        /// What was missing
        message: String,
    },

    /// A factory slot was re-entered while still being built
    #[error("Circular dependency while resolving {service}: {chain}")]
    CircularDependency {
        /// The service type that closed the cycle
        service: ServiceKey,
        /// Rendered chain of in-flight services, outermost first
        chain: String,
    },

    /// Too many nested resolutions were in flight
    #[error("Resolution depth limit of {limit} exceeded while resolving {service}")]
    DepthLimitExceeded {
        /// The service type that hit the limit
        service: ServiceKey,
        /// Configured limit
        limit: usize,
    },

    /// A decorator did not request its own type exactly once
    #[error(
        "Decorator '{description}' for {service} at depth {depth} requested its own type {inner_calls} times (expected 1)"
    )]
    DecoratorContract {
        /// The decorated service type
        service: ServiceKey,
        /// Description of the offending decorator
        description: String,
        /// Depth the decorator ran at
        depth: usize,
        /// Number of inward requests it made
        inner_calls: usize,
    },

    /// Error raised from inside a factory body
    #[error("Factory error: {message}")]
    Factory {
        /// Description of the factory error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O operation error
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal invariant violation
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

// Resolution error creation methods
impl Error {
    /// Create an unresolved-type error for a type with no registration
    pub fn not_registered(service: ServiceKey) -> Self {
        Self::UnresolvedType {
            service,
            reason: UnresolvedReason::NotRegistered,
        }
    }

    /// Create an unresolved-type error for an exhausted decorator chain
    pub fn decorators_exhausted(service: ServiceKey, depth: usize) -> Self {
        Self::UnresolvedType {
            service,
            reason: UnresolvedReason::DecoratorsExhausted { depth },
        }
    }

    /// Create an invalid result error
    pub fn invalid_result<S: Into<String>>(message: S) -> Self {
        Self::InvalidResult {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

// Factory and configuration error creation methods
impl Error {
    /// Create a factory error
    pub fn factory<S: Into<String>>(message: S) -> Self {
        Self::Factory {
            message: message.into(),
            source: None,
        }
    }

    /// Create a factory error with source
    pub fn factory_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Factory {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create an I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }
}

// Inspection helpers
impl Error {
    /// Follow `ResolutionFailure` wrappers down to the error a factory raised first
    pub fn root_cause(&self) -> &Error {
        let mut current = self;
        while let Self::ResolutionFailure { source, .. } = current {
            current = source;
        }
        current
    }

    /// Service types named by nested `ResolutionFailure` wrappers, outermost first
    pub fn resolution_path(&self) -> Vec<ServiceKey> {
        let mut path = Vec::new();
        let mut current = self;
        while let Self::ResolutionFailure {
            service, source, ..
        } = current
        {
            path.push(*service);
            current = source;
        }
        path
    }
}
