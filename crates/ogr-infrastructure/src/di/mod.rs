//! Dependency Injection - resolution engine
//!
//! ```text
//! ResolverRegistry ── owns ──> RegistrationTable ── ServiceKey ──> TypeHandler
//!        │                                                          ├── primary
//!        │ get::<T>()                                               └── decorators (outermost first)
//!        ▼
//! ResolutionSession (one per root request)
//!   ├── depth per type     (decorator re-entrancy)
//!   ├── instance cache     (one instance per type)
//!   └── tracked instances  (identity-deduplicated)
//! ```

pub mod handler;
pub mod registration;
pub mod registry;
pub mod session;
pub mod table;

pub use handler::{FactorySlot, TypeHandler};
pub use registration::{Registration, RegistrationKind};
pub use registry::ResolverRegistry;
pub use session::ResolutionSession;
pub use table::RegistrationTable;
