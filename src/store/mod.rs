//! The store core: state ownership, dispatch, subscription.

pub mod api;
pub mod core;

pub use api::{dispatcher, reducer, DispatchFn, Listener, ReducerFn, StoreApi, StoreHandle};
pub use core::{Store, Subscription};
