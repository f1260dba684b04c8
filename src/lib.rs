//! # minidux
//!
//! A minimal unidirectional-data-flow state container: one mutable state
//! tree, pure reducers, synchronous subscriber notification, reducer
//! composition over named slices, an enhancer chain for wrapping dispatch,
//! and a thin view-binding layer.
//!
//! # Architecture
//!
//! ```text
//! Action ──→ dispatch ──→ Reducer ──→ State ──→ Listeners ──→ Views
//!    ↑                                                          │
//!    └──────────────────────────────────────────────────────────┘
//! ```
//!
//! - **State**: an immutable tree, replaced wholesale on each dispatch
//! - **Action**: a plain record with a `type` field describing a transition
//! - **Reducer**: a pure function `(state, action) -> state`
//! - **Enhancer**: wraps store construction to add dispatch semantics
//!
//! The execution model is single-threaded but reentrancy-prone: listeners
//! may dispatch again, reducers may not, and the listener list is
//! snapshotted copy-on-write so subscribing or unsubscribing
//! mid-notification never skips or duplicates an invocation for the
//! in-flight round.

pub mod action;
pub mod bind;
pub mod binding;
pub mod combine;
pub mod enhance;
pub mod error;
pub mod state;
pub mod store;

pub use action::{is_plain_record, Action, ActionRecord, Thunk};
pub use bind::{
    action_creator, bind_action_creator_map, bind_action_creators, ActionCreator,
    ActionCreatorMap, ActionCreators, BoundAction, BoundActionCreators,
};
pub use binding::{
    connect, ActionProps, BindingPhase, BoundView, Connector, Props, Provider, Selector, View,
};
pub use combine::{combine_reducers, slice_reducer, SliceReducer};
pub use enhance::{create_store, Enhancer, StoreFactory, ThunkEnhancer};
pub use error::{ShapeProbe, StoreError};
pub use state::{
    same_slice, same_tree, slice, tree_from_json, tree_to_json, SliceMap, StateValue,
};
pub use store::{
    dispatcher, reducer, DispatchFn, Listener, ReducerFn, Store, StoreApi, StoreHandle,
    Subscription,
};
