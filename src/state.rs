//! State tree representations.
//!
//! The store is generic over its state tree; these aliases are the
//! conventional dynamic tree. "Referential equality" from the state-container
//! contract maps to `Arc` pointer identity: a reducer that ignores an action
//! returns the same `Arc`, and change detection compares allocations, never
//! contents.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;

/// One state slice, or a whole uncombined tree. Cloning is cheap.
pub type StateValue = Arc<Value>;

/// Composite state produced by `combine_reducers`: named slices keyed by the
/// reducer-map keys. Identity-preserving: when no slice changes, the combined
/// reducer returns the previous `Arc` itself.
pub type SliceMap = Arc<BTreeMap<String, StateValue>>;

/// Wrap a JSON value as a slice.
pub fn slice(value: Value) -> StateValue {
    Arc::new(value)
}

/// True when two slices are the same allocation.
pub fn same_slice(a: &StateValue, b: &StateValue) -> bool {
    Arc::ptr_eq(a, b)
}

/// True when two composite trees are the same allocation.
pub fn same_tree(a: &SliceMap, b: &SliceMap) -> bool {
    Arc::ptr_eq(a, b)
}

/// Flatten a composite tree into one JSON object, for external persistence
/// collaborators. The store defines no format of its own; this is plain JSON.
pub fn tree_to_json(tree: &SliceMap) -> Value {
    Value::Object(
        tree.iter()
            .map(|(key, slice)| (key.clone(), (**slice).clone()))
            .collect(),
    )
}

/// Rebuild a composite tree from a persisted JSON object, e.g. to pass as
/// preloaded state. Returns `None` for non-object values.
pub fn tree_from_json(value: Value) -> Option<SliceMap> {
    match value {
        Value::Object(map) => Some(Arc::new(
            map.into_iter()
                .map(|(key, slice)| (key, Arc::new(slice)))
                .collect(),
        )),
        _ => None,
    }
}
