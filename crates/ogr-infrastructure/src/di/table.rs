//! Registration table: service key to type handler

use std::collections::HashMap;

use ogr_domain::error::Result;
use ogr_domain::value_objects::ServiceKey;

use super::handler::TypeHandler;
use super::registration::Registration;

/// Mapping from service type to its handler
///
/// Only grows while the registry is being configured; sessions borrow it
/// read-only.
#[derive(Debug, Default)]
pub struct RegistrationTable {
    handlers: HashMap<ServiceKey, TypeHandler>,
}

impl RegistrationTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `registration` into the handler for its service, creating it if absent
    pub fn register(&mut self, registration: Registration) -> Result<()> {
        let service = registration.service();
        self.handlers
            .entry(service)
            .or_default()
            .add(registration)
    }

    /// Handler registered for `service`
    pub fn handler(&self, service: ServiceKey) -> Option<&TypeHandler> {
        self.handlers.get(&service)
    }

    /// Whether `service` can be resolved (see [`TypeHandler::has`])
    pub fn has(&self, service: ServiceKey, primary_only: bool) -> bool {
        self.handlers
            .get(&service)
            .is_some_and(|handler| handler.has(primary_only))
    }

    /// Every registered service type, sorted by name
    pub fn services(&self) -> Vec<ServiceKey> {
        let mut services: Vec<ServiceKey> = self.handlers.keys().copied().collect();
        services.sort_by_key(|service| service.name());
        services
    }

    /// Number of registered service types
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
