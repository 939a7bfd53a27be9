//! Resolved instances and the identity-deduplicated tracked set

use std::any::Any;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use super::ServiceKey;

/// Type-erased handle to one instance built during a resolution session
///
/// The handle keeps the instance alive and remembers the allocation address,
/// which is the instance identity used for deduplication. Two values that
/// compare equal but live in different allocations are different instances.
#[derive(Clone)]
pub struct ResolvedInstance {
    service: ServiceKey,
    // Always an `Arc<T>` for the `T` named by `service`
    value: Arc<dyn Any + Send + Sync>,
    address: usize,
}

impl ResolvedInstance {
    /// Erase a typed instance
    pub fn new<T: ?Sized + Send + Sync + 'static>(instance: Arc<T>) -> Self {
        let address = Arc::as_ptr(&instance).cast::<()>() as usize;
        Self {
            service: ServiceKey::of::<T>(),
            value: Arc::new(instance),
            address,
        }
    }

    /// Service type this instance was built for
    pub fn service(&self) -> ServiceKey {
        self.service
    }

    /// Allocation address identifying the instance
    pub fn address(&self) -> usize {
        self.address
    }

    /// Whether this instance was built for contract `T`
    pub fn is<T: ?Sized + Send + Sync + 'static>(&self) -> bool {
        self.value.is::<Arc<T>>()
    }

    /// Recover the typed instance, if it was built for contract `T`
    pub fn downcast<T: ?Sized + Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        self.value.downcast_ref::<Arc<T>>().cloned()
    }

    /// Whether both handles point at the same allocation
    pub fn same_instance(&self, other: &ResolvedInstance) -> bool {
        self.address == other.address
    }
}

impl fmt::Debug for ResolvedInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedInstance")
            .field("service", &self.service)
            .field("address", &format_args!("{:#x}", self.address))
            .finish()
    }
}

/// Ordered set of every distinct instance produced while resolving one root request
#[derive(Debug, Clone, Default)]
pub struct TrackedInstances {
    instances: Vec<ResolvedInstance>,
    addresses: HashSet<usize>,
}

impl TrackedInstances {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `instance` unless the same allocation is already tracked
    ///
    /// Returns `true` when the instance was added.
    pub fn insert(&mut self, instance: ResolvedInstance) -> bool {
        if !self.addresses.insert(instance.address()) {
            return false;
        }
        self.instances.push(instance);
        true
    }

    /// Number of distinct instances
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Whether nothing was tracked
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Instances in the order they finished building
    pub fn iter(&self) -> std::slice::Iter<'_, ResolvedInstance> {
        self.instances.iter()
    }

    /// Whether this exact allocation is tracked
    pub fn contains<T: ?Sized>(&self, instance: &Arc<T>) -> bool {
        let address = Arc::as_ptr(instance).cast::<()>() as usize;
        self.addresses.contains(&address)
    }

    /// All tracked instances built for contract `T`
    pub fn of_type<T: ?Sized + Send + Sync + 'static>(&self) -> Vec<Arc<T>> {
        self.instances
            .iter()
            .filter_map(ResolvedInstance::downcast::<T>)
            .collect()
    }

    /// Service types of the tracked instances, in tracking order
    pub fn services(&self) -> Vec<ServiceKey> {
        self.instances.iter().map(ResolvedInstance::service).collect()
    }
}

impl<'a> IntoIterator for &'a TrackedInstances {
    type Item = &'a ResolvedInstance;
    type IntoIter = std::slice::Iter<'a, ResolvedInstance>;

    fn into_iter(self) -> Self::IntoIter {
        self.instances.iter()
    }
}
