//! Outcome of one root resolution request

use std::fmt;
use std::sync::Arc;

use super::{ServiceKey, TrackedInstances};
use crate::error::{Error, Result};

/// Root instance paired with every instance built while resolving it
pub struct ResolutionResult<T: ?Sized> {
    instance: Arc<T>,
    tracked: TrackedInstances,
    factory_invocations: usize,
}

impl<T: ?Sized + 'static> ResolutionResult<T> {
    /// Assemble a result, failing if either part is absent
    pub fn new(instance: Option<Arc<T>>, tracked: Option<TrackedInstances>) -> Result<Self> {
        let instance = instance.ok_or_else(|| {
            Error::invalid_result(format!(
                "missing root instance for {}",
                ServiceKey::of::<T>()
            ))
        })?;
        let tracked = tracked.ok_or_else(|| {
            Error::invalid_result(format!(
                "missing tracked instances for {}",
                ServiceKey::of::<T>()
            ))
        })?;
        Ok(Self {
            instance,
            tracked,
            factory_invocations: 0,
        })
    }

    /// Record how many factories ran to produce this result
    pub fn with_factory_invocations(mut self, count: usize) -> Self {
        self.factory_invocations = count;
        self
    }

    /// The resolved root instance
    pub fn instance(&self) -> &Arc<T> {
        &self.instance
    }

    /// Every distinct instance built for this request, root included
    pub fn tracked(&self) -> &TrackedInstances {
        &self.tracked
    }

    /// Number of factory invocations the session performed
    pub fn factory_invocations(&self) -> usize {
        self.factory_invocations
    }

    /// Split into the root instance and the tracked set
    pub fn into_parts(self) -> (Arc<T>, TrackedInstances) {
        (self.instance, self.tracked)
    }

    /// Keep only the root instance
    pub fn into_instance(self) -> Arc<T> {
        self.instance
    }
}

impl<T: ?Sized + 'static> fmt::Debug for ResolutionResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolutionResult")
            .field("service", &ServiceKey::of::<T>())
            .field("tracked", &self.tracked.len())
            .field("factory_invocations", &self.factory_invocations)
            .finish()
    }
}
