//! Registered factories
//!
//! A factory is stored type-erased so one table can hold every contract. The
//! typed closure is wrapped once at registration time; the session only ever
//! sees [`ResolvedInstance`] values.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use ogr_domain::error::Result;
use ogr_domain::value_objects::{ResolvedInstance, ServiceKey};

use super::session::ResolutionSession;

/// Narrow invoke interface behind which typed factories are stored
trait ErasedFactory: Send + Sync {
    fn invoke(&self, session: &mut ResolutionSession<'_>) -> Result<ResolvedInstance>;
}

/// Typed closure producing `Arc<T>`
struct TypedFactory<T: ?Sized, F> {
    factory: F,
    // fn pointer keeps Send/Sync independent of T
    _contract: PhantomData<fn() -> Arc<T>>,
}

impl<T, F> ErasedFactory for TypedFactory<T, F>
where
    T: ?Sized + Send + Sync + 'static,
    F: Fn(&mut ResolutionSession<'_>) -> Result<Arc<T>> + Send + Sync,
{
    fn invoke(&self, session: &mut ResolutionSession<'_>) -> Result<ResolvedInstance> {
        (self.factory)(session).map(ResolvedInstance::new)
    }
}

/// Whether a registration builds the type or wraps it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationKind {
    /// The canonical constructor, at most one per type
    Primary,
    /// A wrapper that requests the same type from the session and augments it
    Decorator,
}

impl fmt::Display for RegistrationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => f.write_str("primary"),
            Self::Decorator => f.write_str("decorator"),
        }
    }
}

/// One registered factory with its diagnostic description
pub struct Registration {
    service: ServiceKey,
    kind: RegistrationKind,
    description: String,
    factory: Box<dyn ErasedFactory>,
}

impl Registration {
    /// Wrap a typed factory producing `Arc<T>`
    pub fn new<T, F>(kind: RegistrationKind, description: impl Into<String>, factory: F) -> Self
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&mut ResolutionSession<'_>) -> Result<Arc<T>> + Send + Sync + 'static,
    {
        Self {
            service: ServiceKey::of::<T>(),
            kind,
            description: description.into(),
            factory: Box::new(TypedFactory {
                factory,
                _contract: PhantomData,
            }),
        }
    }

    /// Service type the factory builds
    pub fn service(&self) -> ServiceKey {
        self.service
    }

    /// Primary or decorator
    pub fn kind(&self) -> RegistrationKind {
        self.kind
    }

    /// Free-form description echoed in errors
    pub fn description(&self) -> &str {
        &self.description
    }

    pub(crate) fn invoke(&self, session: &mut ResolutionSession<'_>) -> Result<ResolvedInstance> {
        self.factory.invoke(session)
    }
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("service", &self.service)
            .field("kind", &self.kind)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}
