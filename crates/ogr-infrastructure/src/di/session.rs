//! Resolution session
//!
//! One session serves exactly one root request. It walks the object graph by
//! recursively invoking factories, handing itself to each one as the resolver
//! capability.
//!
//! ## Decorator depth
//!
//! Decorators request their own type from the session to obtain the instance
//! they wrap. The session keeps a per-type depth counter: a request for `T`
//! made while `k` factories of `T` are in flight runs the factory at depth
//! `k`, that is the `k`-th decorator (outermost first) or the primary once the
//! chain is used up. The counter is restored on every exit path, so sibling
//! requests elsewhere in the graph start from the same depth.
//!
//! ```text
//! get::<T>()            depth 0 -> D2 ──┐
//!   D2: resolve::<T>()  depth 1 -> D1 ──┤   result: D2(D1(P))
//!     D1: resolve::<T>() depth 2 -> P ──┘
//! ```
//!
//! Only depth-0 requests read or write the instance cache, so a decorator's
//! inward request always builds a fresh inner instance.

use std::collections::HashMap;
use std::sync::Arc;

use ogr_domain::constants::CHAIN_SEPARATOR;
use ogr_domain::error::{Error, Result};
use ogr_domain::value_objects::{ResolvedInstance, ServiceKey, TrackedInstances};
use tracing::{debug, trace, warn};

use super::handler::{FactorySlot, TypeHandler};
use super::registration::Registration;
use super::table::RegistrationTable;
use crate::config::{DecoratorPolicy, ResolverConfig};

/// A factory currently executing
#[derive(Debug)]
struct Frame {
    service: ServiceKey,
    slot: FactorySlot,
    // Requests for `service` made directly from this factory's body
    inner_calls: usize,
}

/// Per-request resolution state
pub struct ResolutionSession<'r> {
    table: &'r RegistrationTable,
    config: &'r ResolverConfig,
    depths: HashMap<ServiceKey, usize>,
    cache: HashMap<ServiceKey, ResolvedInstance>,
    tracked: TrackedInstances,
    in_flight: Vec<Frame>,
    invocations: usize,
}

impl<'r> ResolutionSession<'r> {
    pub(crate) fn new(table: &'r RegistrationTable, config: &'r ResolverConfig) -> Self {
        Self {
            table,
            config,
            depths: HashMap::new(),
            cache: HashMap::new(),
            tracked: TrackedInstances::new(),
            in_flight: Vec::new(),
            invocations: 0,
        }
    }

    /// Resolve contract `T`, building it and its dependencies as needed
    pub fn resolve<T: ?Sized + Send + Sync + 'static>(&mut self) -> Result<Arc<T>> {
        let service = ServiceKey::of::<T>();
        let instance = self.resolve_key(service)?;
        instance.downcast::<T>().ok_or_else(|| {
            Error::internal(format!(
                "instance built for {service} does not have the registered type"
            ))
        })
    }

    /// Type-erased resolution by key
    pub fn resolve_key(&mut self, service: ServiceKey) -> Result<ResolvedInstance> {
        let depth = self.depth(service);
        if depth == 0 {
            if let Some(cached) = self.cache.get(&service) {
                trace!(service = %service, "Session cache hit");
                return Ok(cached.clone());
            }
        }

        let table = self.table;
        let handler = table
            .handler(service)
            .ok_or_else(|| Error::not_registered(service))?;

        self.note_inner_call(service);
        self.depths.insert(service, depth + 1);
        let outcome = self.invoke_at(service, handler, depth);
        self.restore_depth(service, depth);
        let instance = outcome?;

        if depth == 0 {
            self.cache.insert(service, instance.clone());
        }
        self.tracked.insert(instance.clone());
        Ok(instance)
    }

    /// Current decorator depth for contract `T`
    pub fn depth_of<T: ?Sized + 'static>(&self) -> usize {
        self.depth(ServiceKey::of::<T>())
    }

    /// Instances built so far
    pub fn tracked(&self) -> &TrackedInstances {
        &self.tracked
    }

    /// Number of factories invoked so far
    pub fn invocations(&self) -> usize {
        self.invocations
    }

    /// Consume the session, keeping the tracked set and invocation count
    pub(crate) fn finish(self) -> (TrackedInstances, usize) {
        (self.tracked, self.invocations)
    }

    fn depth(&self, service: ServiceKey) -> usize {
        self.depths.get(&service).copied().unwrap_or(0)
    }

    fn restore_depth(&mut self, service: ServiceKey, depth: usize) {
        if depth == 0 {
            self.depths.remove(&service);
        } else {
            self.depths.insert(service, depth);
        }
    }

    // Counts only requests made while the frame for `service` is on top
    fn note_inner_call(&mut self, service: ServiceKey) {
        if let Some(frame) = self.in_flight.last_mut() {
            if frame.service == service {
                frame.inner_calls += 1;
            }
        }
    }

    fn invoke_at(
        &mut self,
        service: ServiceKey,
        handler: &'r TypeHandler,
        depth: usize,
    ) -> Result<ResolvedInstance> {
        if self.in_flight.len() >= self.config.max_depth {
            return Err(Error::DepthLimitExceeded {
                service,
                limit: self.config.max_depth,
            });
        }

        let (slot, registration) = handler
            .select(depth)
            .ok_or_else(|| Error::decorators_exhausted(service, depth))?;

        if self
            .in_flight
            .iter()
            .any(|frame| frame.service == service && frame.slot == slot)
        {
            return Err(Error::CircularDependency {
                service,
                chain: self.render_chain(service),
            });
        }

        debug!(
            service = %service,
            depth,
            slot = %slot,
            description = registration.description(),
            "Invoking factory"
        );
        self.in_flight.push(Frame {
            service,
            slot,
            inner_calls: 0,
        });
        self.invocations += 1;
        let result = registration.invoke(self);
        let inner_calls = self.in_flight.pop().map_or(0, |frame| frame.inner_calls);

        let instance = result.map_err(|source| Error::ResolutionFailure {
            service,
            depth,
            registrations: handler.describe(),
            source: Box::new(source),
        })?;

        if matches!(slot, FactorySlot::Decorator(_)) {
            self.check_decorator_contract(service, registration, depth, inner_calls)?;
        }
        Ok(instance)
    }

    fn check_decorator_contract(
        &self,
        service: ServiceKey,
        registration: &Registration,
        depth: usize,
        inner_calls: usize,
    ) -> Result<()> {
        if inner_calls == 1 {
            return Ok(());
        }
        match self.config.decorator_policy {
            DecoratorPolicy::Strict => Err(Error::DecoratorContract {
                service,
                description: registration.description().to_string(),
                depth,
                inner_calls,
            }),
            DecoratorPolicy::Lenient => {
                warn!(
                    service = %service,
                    depth,
                    inner_calls,
                    description = registration.description(),
                    "Decorator did not request its own type exactly once"
                );
                Ok(())
            }
        }
    }

    fn render_chain(&self, service: ServiceKey) -> String {
        self.in_flight
            .iter()
            .map(|frame| format!("{} ({})", frame.service, frame.slot))
            .chain(std::iter::once(service.to_string()))
            .collect::<Vec<_>>()
            .join(CHAIN_SEPARATOR)
    }
}
