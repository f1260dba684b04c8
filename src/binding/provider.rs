//! The ambient-store channel.

use std::sync::Arc;

use crate::store::StoreHandle;

/// Holds one store handle and makes it available to a whole view tree
/// without prop-drilling. Deliberately explicit injection rather than a
/// process-wide singleton: views receive the provider, so tests can swap
/// stores freely.
pub struct Provider<S> {
    store: StoreHandle<S>,
}

impl<S> Provider<S> {
    pub fn new(store: StoreHandle<S>) -> Self {
        Self { store }
    }

    /// The ambient store.
    pub fn store(&self) -> StoreHandle<S> {
        Arc::clone(&self.store)
    }
}

impl<S> Clone for Provider<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}
