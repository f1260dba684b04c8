//! Thunk support: dispatching a deferred action runs it with the store
//! instead of reducing it.

use std::sync::Arc;

use crate::action::Action;
use crate::enhance::{Enhancer, StoreFactory};
use crate::error::StoreError;
use crate::store::{Listener, ReducerFn, StoreApi, StoreHandle, Subscription};

/// Enhancer that intercepts [`Action::Thunk`] before it reaches the core
/// reducer step. The thunk receives the enhanced store, so dispatches it
/// issues (including further thunks) re-enter at this layer; the core never
/// learns that deferred actions exist.
pub struct ThunkEnhancer;

impl<S: Clone + Send + Sync + 'static> Enhancer<S> for ThunkEnhancer {
    fn enhance(self: Box<Self>, next: StoreFactory<S>) -> StoreFactory<S> {
        StoreFactory::new(move |reducer, preloaded| {
            let inner = next.build(reducer, preloaded)?;
            Ok(Arc::new(ThunkStore { inner }) as StoreHandle<S>)
        })
    }
}

struct ThunkStore<S> {
    inner: StoreHandle<S>,
}

impl<S: Clone + Send + Sync + 'static> StoreApi<S> for ThunkStore<S> {
    fn dispatch(&self, action: Action<S>) -> Result<Action<S>, StoreError> {
        match action {
            Action::Thunk(thunk) => thunk.run(self),
            action => self.inner.dispatch(action),
        }
    }

    fn get_state(&self) -> Result<S, StoreError> {
        self.inner.get_state()
    }

    fn subscribe(&self, listener: Listener) -> Result<Subscription, StoreError> {
        self.inner.subscribe(listener)
    }

    fn replace_reducer(&self, next: ReducerFn<S>) -> Result<(), StoreError> {
        self.inner.replace_reducer(next)
    }
}
