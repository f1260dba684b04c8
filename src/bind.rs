//! Binding action creators to a store's dispatch.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;

use crate::action::Action;
use crate::error::StoreError;
use crate::store::DispatchFn;

/// Produces an action (or thunk) from call arguments.
pub type ActionCreator<S> = Arc<dyn Fn(&[Value]) -> Action<S> + Send + Sync>;

/// A creator bound to a store: calling it dispatches the created action and
/// returns `dispatch`'s result, so the call is observably identical to
/// dispatching by hand.
pub type BoundAction<S> = Arc<dyn Fn(&[Value]) -> Result<Action<S>, StoreError> + Send + Sync>;

/// Named action creators. `None` marks an entry that is not callable (e.g. a
/// constant re-exported alongside the creators); such entries are silently
/// dropped when bound.
pub type ActionCreatorMap<S> = BTreeMap<String, Option<ActionCreator<S>>>;

/// Input to [`bind_action_creators`]: one creator, or a named map.
pub enum ActionCreators<S> {
    Single(ActionCreator<S>),
    Map(ActionCreatorMap<S>),
}

impl<S> Clone for ActionCreators<S> {
    fn clone(&self) -> Self {
        match self {
            Self::Single(creator) => Self::Single(Arc::clone(creator)),
            Self::Map(map) => Self::Map(map.clone()),
        }
    }
}

/// Output of [`bind_action_creators`], mirroring the input shape.
pub enum BoundActionCreators<S> {
    Single(BoundAction<S>),
    Map(BTreeMap<String, BoundAction<S>>),
}

impl<S> BoundActionCreators<S> {
    /// The bound creator under `name`, for map-shaped input.
    pub fn get(&self, name: &str) -> Option<&BoundAction<S>> {
        match self {
            Self::Single(_) => None,
            Self::Map(map) => map.get(name),
        }
    }

    /// The bound creator, for single-function input.
    pub fn single(&self) -> Option<&BoundAction<S>> {
        match self {
            Self::Single(bound) => Some(bound),
            Self::Map(_) => None,
        }
    }
}

fn bind_one<S: 'static>(creator: ActionCreator<S>, dispatch: DispatchFn<S>) -> BoundAction<S> {
    Arc::new(move |args| dispatch(creator(args)))
}

/// Bind a map of creators, dropping non-callable entries.
pub fn bind_action_creator_map<S: 'static>(
    creators: ActionCreatorMap<S>,
    dispatch: DispatchFn<S>,
) -> BTreeMap<String, BoundAction<S>> {
    let mut bound = BTreeMap::new();
    for (name, creator) in creators {
        if let Some(creator) = creator {
            bound.insert(name, bind_one(creator, Arc::clone(&dispatch)));
        }
    }
    bound
}

/// Wrap action creators so each becomes a zero-boilerplate "dispatch this"
/// call bound to one store's dispatch.
pub fn bind_action_creators<S: 'static>(
    creators: ActionCreators<S>,
    dispatch: DispatchFn<S>,
) -> BoundActionCreators<S> {
    match creators {
        ActionCreators::Single(creator) => {
            BoundActionCreators::Single(bind_one(creator, dispatch))
        }
        ActionCreators::Map(map) => {
            BoundActionCreators::Map(bind_action_creator_map(map, dispatch))
        }
    }
}

/// Build an action creator from a plain closure.
pub fn action_creator<S, F>(create: F) -> ActionCreator<S>
where
    F: Fn(&[Value]) -> Action<S> + Send + Sync + 'static,
{
    Arc::new(create)
}
