//! Store-construction enhancers.
//!
//! An enhancer does not wrap a built store after the fact; it wraps the
//! "construct store" operation itself, so it can layer new dispatch
//! semantics around whatever the rest of the chain produces. The chain is an
//! explicit list applied in a defined order, not ad hoc closure nesting.

pub mod thunk;

pub use thunk::ThunkEnhancer;

use std::sync::Arc;

use crate::error::StoreError;
use crate::store::{ReducerFn, Store, StoreHandle};

/// One-shot store constructor. Enhancers consume the next factory in the
/// chain and produce a wrapping one.
pub struct StoreFactory<S> {
    construct: Box<dyn FnOnce(ReducerFn<S>, Option<S>) -> Result<StoreHandle<S>, StoreError> + Send>,
}

impl<S: Clone + Send + Sync + 'static> StoreFactory<S> {
    pub fn new<F>(construct: F) -> Self
    where
        F: FnOnce(ReducerFn<S>, Option<S>) -> Result<StoreHandle<S>, StoreError> + Send + 'static,
    {
        Self {
            construct: Box::new(construct),
        }
    }

    /// The unenhanced constructor: builds the core store.
    pub fn base() -> Self {
        Self::new(|reducer, preloaded| {
            let store = Store::with_state(reducer, preloaded)?;
            Ok(Arc::new(store) as StoreHandle<S>)
        })
    }

    pub fn build(
        self,
        reducer: ReducerFn<S>,
        preloaded: Option<S>,
    ) -> Result<StoreHandle<S>, StoreError> {
        (self.construct)(reducer, preloaded)
    }
}

/// Wraps store construction to add cross-cutting dispatch behavior.
pub trait Enhancer<S>: Send {
    fn enhance(self: Box<Self>, next: StoreFactory<S>) -> StoreFactory<S>;
}

/// Build a store through an enhancer chain. The first enhancer in the list
/// is outermost: its dispatch wraps the dispatch produced by everything
/// after it. An empty list builds the core store directly.
pub fn create_store<S: Clone + Send + Sync + 'static>(
    reducer: ReducerFn<S>,
    preloaded: Option<S>,
    enhancers: Vec<Box<dyn Enhancer<S>>>,
) -> Result<StoreHandle<S>, StoreError> {
    let mut factory = StoreFactory::base();
    for enhancer in enhancers.into_iter().rev() {
        factory = enhancer.enhance(factory);
    }
    factory.build(reducer, preloaded)
}
