//! The store's public operation surface and the callable aliases around it.

use std::sync::Arc;

use crate::action::{Action, ActionRecord};
use crate::error::StoreError;
use crate::store::core::Subscription;

/// Pure state-transition function for a whole tree. `None` in means "no
/// state yet" (the synthetic initialization dispatch).
pub type ReducerFn<S> =
    Arc<dyn Fn(Option<S>, &ActionRecord) -> Result<S, StoreError> + Send + Sync>;

/// Change listener. Zero-argument by contract: a listener is not handed the
/// action or the resulting state; it reads the store via `get_state` itself.
pub type Listener = Arc<dyn Fn() + Send + Sync>;

/// Shared handle to any store, core or enhancer-wrapped.
pub type StoreHandle<S> = Arc<dyn StoreApi<S>>;

/// A `dispatch` detached from its store, for the action-creator binder.
pub type DispatchFn<S> = Arc<dyn Fn(Action<S>) -> Result<Action<S>, StoreError> + Send + Sync>;

/// The four store operations. This is the seam enhancers wrap: an enhanced
/// store overrides `dispatch` (or any other operation) and delegates the
/// rest.
pub trait StoreApi<S>: Send + Sync {
    /// Run the reducer on `action`, replace the state tree, and notify the
    /// listener snapshot committed at dispatch time. Returns the action
    /// unchanged so wrappers can chain.
    fn dispatch(&self, action: Action<S>) -> Result<Action<S>, StoreError>;

    /// The current state tree, by cheap clone.
    fn get_state(&self) -> Result<S, StoreError>;

    /// Register a change listener. The returned token unsubscribes it.
    fn subscribe(&self, listener: Listener) -> Result<Subscription, StoreError>;

    /// Swap the reducer and re-initialize the tree for its shape.
    fn replace_reducer(&self, next: ReducerFn<S>) -> Result<(), StoreError>;
}

/// Detach `dispatch` from a store handle.
pub fn dispatcher<S: 'static>(store: &StoreHandle<S>) -> DispatchFn<S> {
    let store = Arc::clone(store);
    Arc::new(move |action| store.dispatch(action))
}

/// Build a root reducer from a plain closure.
pub fn reducer<S, F>(reduce: F) -> ReducerFn<S>
where
    F: Fn(Option<S>, &ActionRecord) -> Result<S, StoreError> + Send + Sync + 'static,
{
    Arc::new(reduce)
}
