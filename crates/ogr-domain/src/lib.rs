//! # Domain Layer
//!
//! Core types shared by every layer of the object graph resolver.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | Error type and `Result` alias |
//! | [`value_objects`] | Service keys, resolved instances, resolution results |
//! | [`constants`] | Resolver defaults |

pub mod constants;
pub mod error;
pub mod value_objects;

pub use error::{Error, Result, UnresolvedReason};
pub use value_objects::{ResolutionResult, ResolvedInstance, ServiceKey, TrackedInstances};
