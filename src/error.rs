//! Error types for the store and its combinators.
//!
//! Every variant is a programmer error: it signals a broken contract at the
//! call site and propagates to the caller instead of being handled
//! internally. `Clone` is required so a composition-time shape error can be
//! replayed on every invocation of the combined reducer.

use std::fmt;

use thiserror::Error;

/// Which composition-time probe a slice reducer failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeProbe {
    /// Returned no state for the private initialization action.
    Initialization,
    /// Returned no state when probed with a random, unknown action type.
    UnknownProbe,
}

impl fmt::Display for ShapeProbe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeProbe::Initialization => f.write_str(
                "returned no state during initialization: when the incoming state is \
                 undefined you must return the initial state, which may not be undefined \
                 (return null to hold no value)",
            ),
            ShapeProbe::UnknownProbe => f.write_str(
                "returned no state when probed with a random unknown action type: \
                 return the current state for any unknown action, and do not handle \
                 the store's private action types",
            ),
        }
    }
}

/// Errors surfaced by the store core, the reducer combinator, the
/// action-creator binder and the view-binding layer.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Bad construction arguments.
    #[error("configuration error: {reason}")]
    Configuration { reason: String },

    /// A dispatched value violated the action contract.
    #[error("invalid action: {reason}")]
    Validation { reason: String },

    /// A store operation was called while a reducer invocation was active.
    #[error("may not call {operation} while the reducer is executing")]
    Reentrancy { operation: &'static str },

    /// A slice reducer failed the composition-time shape probes. Captured
    /// when `combine_reducers` runs, raised on the combined reducer's first
    /// invocation.
    #[error("reducer \"{key}\" {probe}")]
    ReducerShape { key: String, probe: ShapeProbe },

    /// A slice reducer returned no state for a concrete action. To ignore an
    /// action a reducer must return the previous state; to hold no value it
    /// must return null.
    #[error("reducer \"{key}\" returned no state for action \"{action_type}\"")]
    UndefinedState { key: String, action_type: String },
}

impl StoreError {
    pub(crate) fn configuration(reason: impl Into<String>) -> Self {
        StoreError::Configuration {
            reason: reason.into(),
        }
    }

    pub(crate) fn validation(reason: impl Into<String>) -> Self {
        StoreError::Validation {
            reason: reason.into(),
        }
    }
}
