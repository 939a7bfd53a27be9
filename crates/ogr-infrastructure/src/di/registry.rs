//! Resolver registry - the public façade
//!
//! ## Lifecycle
//!
//! Registration takes `&mut self` and resolution takes `&self`, so the build
//! phase and the resolve phase cannot overlap. Once configured the registry
//! can be shared (e.g. behind an `Arc`) and every `get` call runs its own
//! [`ResolutionSession`], so concurrent root requests share nothing but the
//! read-only table.
//!
//! ## Usage
//!
//! ```ignore
//! let mut registry = ResolverRegistry::new();
//! registry
//!     .register(|_| Ok(Arc::new(PostgresPool::connect()?) as Arc<dyn Pool>))?
//!     .register(|session| Ok(Arc::new(UserRepository::new(session.resolve::<dyn Pool>()?))))?
//!     .decorate(|session| Ok(Arc::new(MeteredPool::new(session.resolve::<dyn Pool>()?)) as Arc<dyn Pool>))?;
//!
//! let result = registry.get::<UserRepository>()?;
//! ```

use std::any::type_name;
use std::sync::Arc;

use ogr_domain::error::Result;
use ogr_domain::value_objects::{ResolutionResult, ServiceKey};
use tracing::debug;

use super::registration::{Registration, RegistrationKind};
use super::session::ResolutionSession;
use super::table::RegistrationTable;
use crate::config::ResolverConfig;

/// Registry of primary and decorator factories keyed by service type
#[derive(Debug, Default)]
pub struct ResolverRegistry {
    table: RegistrationTable,
    config: ResolverConfig,
}

impl ResolverRegistry {
    /// Create an empty registry with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry with the given resolver settings
    ///
    /// Fails with `Configuration` if the settings do not validate.
    pub fn with_config(config: ResolverConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            table: RegistrationTable::new(),
            config,
        })
    }

    /// Resolver settings in effect
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Register the primary factory for `T`, described by the closure's type name
    pub fn register<T, F>(&mut self, factory: F) -> Result<&mut Self>
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&mut ResolutionSession<'_>) -> Result<Arc<T>> + Send + Sync + 'static,
    {
        self.register_described(type_name::<F>(), factory)
    }

    /// Register the primary factory for `T`
    ///
    /// Fails with `DuplicatePrimaryRegistration` if `T` already has one.
    pub fn register_described<T, F>(
        &mut self,
        description: impl Into<String>,
        factory: F,
    ) -> Result<&mut Self>
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&mut ResolutionSession<'_>) -> Result<Arc<T>> + Send + Sync + 'static,
    {
        self.add(Registration::new(RegistrationKind::Primary, description, factory))
    }

    /// Register a decorator for `T`, described by the closure's type name
    pub fn decorate<T, F>(&mut self, factory: F) -> Result<&mut Self>
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&mut ResolutionSession<'_>) -> Result<Arc<T>> + Send + Sync + 'static,
    {
        self.decorate_described(type_name::<F>(), factory)
    }

    /// Register a decorator for `T`
    ///
    /// The most recently registered decorator becomes the outermost wrapper.
    pub fn decorate_described<T, F>(
        &mut self,
        description: impl Into<String>,
        factory: F,
    ) -> Result<&mut Self>
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&mut ResolutionSession<'_>) -> Result<Arc<T>> + Send + Sync + 'static,
    {
        self.add(Registration::new(RegistrationKind::Decorator, description, factory))
    }

    /// Whether `T` has a primary, or with `primary_only == false` any registration
    pub fn has<T: ?Sized + 'static>(&self, primary_only: bool) -> bool {
        self.table.has(ServiceKey::of::<T>(), primary_only)
    }

    /// Resolve `T` in a fresh session
    ///
    /// Every type is built at most once per call; the result carries the root
    /// instance and every distinct instance built along the way.
    pub fn get<T: ?Sized + Send + Sync + 'static>(&self) -> Result<ResolutionResult<T>> {
        let service = ServiceKey::of::<T>();
        debug!(service = %service, "Resolving root service");

        let mut session = ResolutionSession::new(&self.table, &self.config);
        let instance = session.resolve::<T>().inspect_err(|error| {
            debug!(service = %service, error = %error, "Root resolution failed");
        })?;
        let (tracked, invocations) = session.finish();

        debug!(
            service = %service,
            tracked = tracked.len(),
            invocations,
            "Root service resolved"
        );
        Ok(ResolutionResult::new(Some(instance), Some(tracked))?.with_factory_invocations(invocations))
    }

    /// Every registered service type, sorted by name
    pub fn services(&self) -> Vec<ServiceKey> {
        self.table.services()
    }

    /// Listing of the registrations for `T`, if any
    pub fn describe<T: ?Sized + 'static>(&self) -> Option<String> {
        self.table
            .handler(ServiceKey::of::<T>())
            .map(|handler| handler.describe())
    }

    fn add(&mut self, registration: Registration) -> Result<&mut Self> {
        let service = registration.service();
        debug!(
            service = %service,
            kind = %registration.kind(),
            description = registration.description(),
            "Registering factory"
        );
        self.table.register(registration)?;
        Ok(self)
    }
}
