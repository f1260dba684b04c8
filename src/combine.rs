//! Composition of named slice reducers into one root reducer.
//!
//! The combined reducer owns a record keyed by the reducer-map keys. Each
//! slice reducer sees only its own slice; change detection is per-slice
//! pointer identity, and when nothing changed the previous composite tree is
//! returned as-is so subscribers can skip work on reference equality.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::action::{internal, ActionRecord};
use crate::error::{ShapeProbe, StoreError};
use crate::state::{SliceMap, StateValue};
use crate::store::{reducer, ReducerFn};

/// Pure state-transition function for one named slice.
///
/// `None` in is "no state yet". `None` out breaks the contract: a reducer
/// must return the previous slice (the same `Arc`) for unknown actions and
/// `Value::Null` to hold no value.
pub type SliceReducer =
    Arc<dyn Fn(Option<StateValue>, &ActionRecord) -> Option<StateValue> + Send + Sync>;

/// Build a slice reducer from a plain closure.
pub fn slice_reducer<F>(reduce: F) -> SliceReducer
where
    F: Fn(Option<StateValue>, &ActionRecord) -> Option<StateValue> + Send + Sync + 'static,
{
    Arc::new(reduce)
}

/// Compose a mapping of named slice reducers into one root reducer.
///
/// `None` entries are reported with a warning and skipped. Retained reducers
/// are probed at composition time (initialization plus one random unknown
/// type); a failed probe is captured here but surfaces as
/// [`StoreError::ReducerShape`] on the combined reducer's first invocation.
pub fn combine_reducers(reducers: BTreeMap<String, Option<SliceReducer>>) -> ReducerFn<SliceMap> {
    let mut retained: BTreeMap<String, SliceReducer> = BTreeMap::new();
    for (key, entry) in reducers {
        match entry {
            Some(slice) => {
                retained.insert(key, slice);
            }
            None => tracing::warn!(key = %key, "no reducer provided for key; entry skipped"),
        }
    }

    let shape_error = assert_reducer_shape(&retained).err();

    #[cfg(debug_assertions)]
    let unexpected_seen: parking_lot::Mutex<std::collections::BTreeSet<String>> =
        parking_lot::Mutex::new(std::collections::BTreeSet::new());

    reducer(move |state: Option<SliceMap>, action: &ActionRecord| {
        if let Some(error) = &shape_error {
            return Err(error.clone());
        }

        #[cfg(debug_assertions)]
        warn_on_shape_mismatch(state.as_ref(), &retained, action, &unexpected_seen);

        let previous = state.unwrap_or_default();
        let mut changed = false;
        let mut next: BTreeMap<String, StateValue> = BTreeMap::new();
        for (key, slice) in &retained {
            let previous_slice = previous.get(key).cloned();
            let next_slice =
                slice(previous_slice.clone(), action).ok_or_else(|| StoreError::UndefinedState {
                    key: key.clone(),
                    action_type: action.kind_text(),
                })?;
            changed = changed
                || match &previous_slice {
                    Some(previous_slice) => !Arc::ptr_eq(previous_slice, &next_slice),
                    None => true,
                };
            next.insert(key.clone(), next_slice);
        }
        Ok(if changed { Arc::new(next) } else { previous })
    })
}

/// Probe every retained reducer twice: once with the private initialization
/// type and once with a random unknown type, so a reducer that handles the
/// private namespace by accident is still caught.
fn assert_reducer_shape(reducers: &BTreeMap<String, SliceReducer>) -> Result<(), StoreError> {
    for (key, slice) in reducers {
        let init = ActionRecord::of_type(internal::INIT.as_str());
        if slice(None, &init).is_none() {
            return Err(StoreError::ReducerShape {
                key: key.clone(),
                probe: ShapeProbe::Initialization,
            });
        }
        let probe = ActionRecord::of_type(&internal::probe());
        if slice(None, &probe).is_none() {
            return Err(StoreError::ReducerShape {
                key: key.clone(),
                probe: ShapeProbe::UnknownProbe,
            });
        }
    }
    Ok(())
}

/// Non-fatal shape diagnostics, debug builds only. Each unexpected key is
/// reported once; the check is suppressed for the reducer-replacement action
/// because the old tree legitimately mismatches the new map then.
#[cfg(debug_assertions)]
fn warn_on_shape_mismatch(
    state: Option<&SliceMap>,
    reducers: &BTreeMap<String, SliceReducer>,
    action: &ActionRecord,
    seen: &parking_lot::Mutex<std::collections::BTreeSet<String>>,
) {
    if action.kind_is(internal::REPLACE.as_str()) {
        return;
    }
    if reducers.is_empty() {
        tracing::warn!(
            "store has no valid slice reducers; combine_reducers received no usable entries"
        );
        return;
    }
    let Some(state) = state else { return };
    let source = if action.kind_is(internal::INIT.as_str()) {
        "the preloaded state passed to the store"
    } else {
        "the previous state received by the reducer"
    };
    let mut seen = seen.lock();
    for key in state.keys() {
        if !reducers.contains_key(key) && seen.insert(key.clone()) {
            tracing::warn!(
                key = %key,
                "unexpected key found in {source}; no reducer handles it and it will be \
                 dropped on the next change"
            );
        }
    }
}
