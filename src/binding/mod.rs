//! Thin view-binding layer: subscribes views to state slices and rehydrates
//! them on every store change.

pub mod connect;
pub mod provider;

pub use connect::{connect, ActionProps, BindingPhase, BoundView, Connector, Props, Selector, View};
pub use provider::Provider;
