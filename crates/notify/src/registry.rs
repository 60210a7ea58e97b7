//! Observer discovery seam.

use std::sync::Arc;

use crate::traits::Observer;

/// Source of the currently-connected observers, queried at each delivery.
pub trait ObserverRegistry: Send + Sync {
    fn current(&self) -> Vec<Arc<dyn Observer>>;
}

/// A fixed observer set, configured once at startup.
pub struct StaticObservers {
    observers: Vec<Arc<dyn Observer>>,
}

impl StaticObservers {
    pub fn new(observers: Vec<Arc<dyn Observer>>) -> Self {
        Self { observers }
    }
}

impl ObserverRegistry for StaticObservers {
    fn current(&self) -> Vec<Arc<dyn Observer>> {
        self.observers.clone()
    }
}
