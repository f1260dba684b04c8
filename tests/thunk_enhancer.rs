//! The enhancer chain and the thunk enhancer.

mod common;

use std::sync::Arc;

use common::{add_todo_async, app_reducer, is_loading, todo_list};
use minidux::{
    create_store, Action, Enhancer, Listener, ReducerFn, SliceMap, StoreApi, StoreError,
    StoreFactory, StoreHandle, Subscription, ThunkEnhancer,
};
use parking_lot::Mutex;
use serde_json::json;

#[test]
fn empty_chain_builds_a_plain_store() {
    let store = create_store(app_reducer(), None, Vec::new()).unwrap();
    assert!(todo_list(&store.get_state().unwrap()).is_empty());

    let err = store
        .dispatch(Action::thunk(|_store| Ok(Action::of_type("X"))))
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation { .. }));
}

#[test]
fn thunk_enhancer_runs_deferred_actions() {
    let store = create_store(app_reducer(), None, vec![Box::new(ThunkEnhancer)]).unwrap();

    // Record is_loading at every notification; the thunk dispatches the
    // loading action first, then the todo itself.
    let loading_trace = Arc::new(Mutex::new(Vec::new()));
    {
        let store = Arc::clone(&store);
        let loading_trace = Arc::clone(&loading_trace);
        store
            .clone()
            .subscribe(Arc::new(move || {
                loading_trace
                    .lock()
                    .push(is_loading(&store.get_state().unwrap()));
            }))
            .unwrap();
    }

    let returned = store
        .dispatch(add_todo_async()(&[json!("deferred"), json!(7)]))
        .unwrap();
    // The thunk resolves to the final plain action it dispatched.
    assert_eq!(
        returned.as_value().and_then(|value| value.get("type")),
        Some(&json!("ADD_TODO"))
    );

    assert_eq!(*loading_trace.lock(), vec![true, false]);
    let state = store.get_state().unwrap();
    assert!(!is_loading(&state));
    assert_eq!(todo_list(&state)[0].text, "deferred");
}

#[test]
fn plain_actions_pass_through_the_thunk_layer() {
    let store = create_store(app_reducer(), None, vec![Box::new(ThunkEnhancer)]).unwrap();
    store
        .dispatch(Action::record(
            "ADD_TODO",
            json!({ "id": 1, "text": "plain", "completed": false }),
        ))
        .unwrap();
    assert_eq!(todo_list(&store.get_state().unwrap()).len(), 1);
}

#[test]
fn thunks_read_current_state_through_the_store() {
    let store = create_store(app_reducer(), None, vec![Box::new(ThunkEnhancer)]).unwrap();
    store
        .dispatch(Action::record(
            "ADD_TODO",
            json!({ "id": 1, "text": "seed", "completed": false }),
        ))
        .unwrap();

    // Conditional dispatch: only add when the list is not empty.
    store
        .dispatch(Action::thunk(|store| {
            let count = todo_list(&store.get_state()?).len() as u64;
            if count == 0 {
                return Ok(Action::of_type("NOOP"));
            }
            store.dispatch(Action::record(
                "ADD_TODO",
                json!({ "id": count + 1, "text": format!("todo #{}", count + 1), "completed": false }),
            ))
        }))
        .unwrap();

    let list = todo_list(&store.get_state().unwrap());
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].text, "todo #2");
}

/// Pushes its tag on every dispatch, then delegates.
struct TaggingStore {
    tag: &'static str,
    trace: Arc<Mutex<Vec<&'static str>>>,
    inner: StoreHandle<SliceMap>,
}

impl StoreApi<SliceMap> for TaggingStore {
    fn dispatch(&self, action: Action<SliceMap>) -> Result<Action<SliceMap>, StoreError> {
        self.trace.lock().push(self.tag);
        self.inner.dispatch(action)
    }

    fn get_state(&self) -> Result<SliceMap, StoreError> {
        self.inner.get_state()
    }

    fn subscribe(&self, listener: Listener) -> Result<Subscription, StoreError> {
        self.inner.subscribe(listener)
    }

    fn replace_reducer(&self, next: ReducerFn<SliceMap>) -> Result<(), StoreError> {
        self.inner.replace_reducer(next)
    }
}

struct TaggingEnhancer {
    tag: &'static str,
    trace: Arc<Mutex<Vec<&'static str>>>,
}

impl Enhancer<SliceMap> for TaggingEnhancer {
    fn enhance(self: Box<Self>, next: StoreFactory<SliceMap>) -> StoreFactory<SliceMap> {
        StoreFactory::new(move |reducer, preloaded| {
            let inner = next.build(reducer, preloaded)?;
            Ok(Arc::new(TaggingStore {
                tag: self.tag,
                trace: self.trace,
                inner,
            }) as StoreHandle<SliceMap>)
        })
    }
}

#[test]
fn first_enhancer_in_the_chain_is_outermost() {
    let trace = Arc::new(Mutex::new(Vec::new()));
    let store = create_store(
        app_reducer(),
        None,
        vec![
            Box::new(TaggingEnhancer {
                tag: "outer",
                trace: Arc::clone(&trace),
            }),
            Box::new(TaggingEnhancer {
                tag: "inner",
                trace: Arc::clone(&trace),
            }),
        ],
    )
    .unwrap();

    trace.lock().clear();
    store.dispatch(Action::of_type("ANY")).unwrap();
    assert_eq!(*trace.lock(), vec!["outer", "inner"]);
}
