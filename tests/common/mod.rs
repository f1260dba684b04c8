//! Shared todo-domain fixtures: slice reducers, action creators, and store
//! builders used across the integration tests.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::sync::Arc;

use minidux::{
    action_creator, combine_reducers, slice, slice_reducer, Action, ActionCreator,
    ActionCreatorMap, ActionRecord, ReducerFn, SliceMap, SliceReducer, StateValue, Store,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const ADD_TODO: &str = "ADD_TODO";
pub const ADD_TODO_LOADING: &str = "ADD_TODO_LOADING";
pub const TOGGLE_TODO: &str = "TOGGLE_TODO";
pub const REMOVE_TODO: &str = "REMOVE_TODO";
pub const SET_FILTER: &str = "SET_FILTER";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: u64,
    pub text: String,
    pub completed: bool,
}

/// `{ "todo_list": [...], "is_loading": bool }`, newest todo first.
pub fn todos_reducer() -> SliceReducer {
    slice_reducer(|state: Option<StateValue>, action: &ActionRecord| {
        let current =
            state.unwrap_or_else(|| slice(json!({ "todo_list": [], "is_loading": false })));
        match action.kind_str() {
            Some(ADD_TODO) => {
                let item = action.payload()?.clone();
                let mut next = (*current).clone();
                next.get_mut("todo_list")?.as_array_mut()?.insert(0, item);
                next["is_loading"] = json!(false);
                Some(slice(next))
            }
            Some(ADD_TODO_LOADING) => {
                let mut next = (*current).clone();
                next["is_loading"] = json!(true);
                Some(slice(next))
            }
            Some(TOGGLE_TODO) => {
                let id = action.payload()?.get("id")?.clone();
                let mut next = (*current).clone();
                for item in next.get_mut("todo_list")?.as_array_mut()? {
                    if item.get("id") == Some(&id) {
                        let completed = item.get("completed")?.as_bool()?;
                        item["completed"] = json!(!completed);
                    }
                }
                Some(slice(next))
            }
            Some(REMOVE_TODO) => {
                let id = action.payload()?.get("id")?.clone();
                let mut next = (*current).clone();
                next.get_mut("todo_list")?
                    .as_array_mut()?
                    .retain(|item| item.get("id") != Some(&id));
                Some(slice(next))
            }
            _ => Some(current),
        }
    })
}

/// Plain string slice, default `"all"`.
pub fn filter_reducer() -> SliceReducer {
    slice_reducer(|state: Option<StateValue>, action: &ActionRecord| {
        let current = state.unwrap_or_else(|| slice(json!("all")));
        match action.kind_str() {
            Some(SET_FILTER) => Some(slice(action.payload()?.clone())),
            _ => Some(current),
        }
    })
}

pub fn app_reducer() -> ReducerFn<SliceMap> {
    let mut reducers: BTreeMap<String, Option<SliceReducer>> = BTreeMap::new();
    reducers.insert("todos".to_string(), Some(todos_reducer()));
    reducers.insert("filter".to_string(), Some(filter_reducer()));
    combine_reducers(reducers)
}

pub fn todo_store() -> Store<SliceMap> {
    Store::new(app_reducer()).expect("todo store construction")
}

// Action creators. Args: [text, id] for add, [id] for toggle/remove,
// [filter] for set_filter.

pub fn add_todo() -> ActionCreator<SliceMap> {
    action_creator(|args: &[Value]| {
        let text = args.first().cloned().unwrap_or(Value::Null);
        let id = args.get(1).cloned().unwrap_or(json!(1));
        Action::record(
            ADD_TODO,
            json!({ "id": id, "text": text, "completed": false }),
        )
    })
}

pub fn add_todo_async() -> ActionCreator<SliceMap> {
    action_creator(|args: &[Value]| {
        let text = args.first().cloned().unwrap_or(Value::Null);
        let id = args.get(1).cloned().unwrap_or(json!(1));
        Action::thunk(move |store| {
            store.dispatch(Action::of_type(ADD_TODO_LOADING))?;
            store.dispatch(Action::record(
                ADD_TODO,
                json!({ "id": id, "text": text, "completed": false }),
            ))
        })
    })
}

pub fn toggle_todo() -> ActionCreator<SliceMap> {
    action_creator(|args: &[Value]| {
        let id = args.first().cloned().unwrap_or(json!(1));
        Action::record(TOGGLE_TODO, json!({ "id": id }))
    })
}

pub fn remove_todo() -> ActionCreator<SliceMap> {
    action_creator(|args: &[Value]| {
        let id = args.first().cloned().unwrap_or(json!(1));
        Action::record(REMOVE_TODO, json!({ "id": id }))
    })
}

pub fn set_filter() -> ActionCreator<SliceMap> {
    action_creator(|args: &[Value]| {
        let filter = args.first().cloned().unwrap_or(json!("all"));
        Action::record(SET_FILTER, filter)
    })
}

pub fn creator_map() -> ActionCreatorMap<SliceMap> {
    let mut creators: ActionCreatorMap<SliceMap> = BTreeMap::new();
    creators.insert("add_todo".to_string(), Some(add_todo()));
    creators.insert("toggle_todo".to_string(), Some(toggle_todo()));
    creators.insert("remove_todo".to_string(), Some(remove_todo()));
    creators.insert("set_filter".to_string(), Some(set_filter()));
    creators
}

// State accessors.

pub fn todo_list(state: &SliceMap) -> Vec<TodoItem> {
    let todos = state.get("todos").expect("todos slice");
    serde_json::from_value(todos.get("todo_list").cloned().unwrap_or(Value::Null))
        .expect("todo list shape")
}

pub fn is_loading(state: &SliceMap) -> bool {
    let todos = state.get("todos").expect("todos slice");
    todos
        .get("is_loading")
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

pub fn filter(state: &SliceMap) -> String {
    state
        .get("filter")
        .and_then(|slice| slice.as_str())
        .unwrap_or_default()
        .to_string()
}

pub fn filter_slice(state: &SliceMap) -> StateValue {
    Arc::clone(state.get("filter").expect("filter slice"))
}
