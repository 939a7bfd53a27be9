//! Value objects
//!
//! Immutable types passed between the registry, the resolution session and
//! the caller.

pub mod instance;
pub mod result;
pub mod service_key;

pub use instance::{ResolvedInstance, TrackedInstances};
pub use result::ResolutionResult;
pub use service_key::ServiceKey;
