//! The core store: owns the state tree, the active reducer, and the listener
//! registry.
//!
//! Execution is single-threaded in spirit but reentrancy-prone: a listener
//! may dispatch again, a reducer may not. The `reducing` flag guards exactly
//! the reducer-invocation interval, and the listener registry is
//! copy-on-write so subscribing or unsubscribing mid-notification never
//! skips or duplicates an invocation for the in-flight round.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::action::{internal, Action, ActionRecord};
use crate::error::StoreError;
use crate::store::api::{Listener, ReducerFn, StoreApi};

/// One registered listener. Entries are cloned wholesale when the pending
/// list is copied, so the callback itself is shared.
#[derive(Clone)]
struct ListenerEntry {
    id: u64,
    callback: Listener,
}

/// Copy-on-write listener registry.
///
/// `committed` is the snapshot an in-flight dispatch notifies; `pending` is
/// what the next dispatch will commit. Mutation goes through
/// `Arc::make_mut`, which clones only while `pending` is still aliased to
/// `committed` or to an active notification snapshot.
#[derive(Default)]
struct ListenerSet {
    committed: Arc<Vec<ListenerEntry>>,
    pending: Arc<Vec<ListenerEntry>>,
    next_id: u64,
}

impl ListenerSet {
    fn insert(&mut self, callback: Listener) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        Arc::make_mut(&mut self.pending).push(ListenerEntry { id, callback });
        id
    }

    fn remove(&mut self, id: u64) {
        Arc::make_mut(&mut self.pending).retain(|entry| entry.id != id);
    }

    /// Promote the pending list and return the snapshot to notify.
    fn commit(&mut self) -> Arc<Vec<ListenerEntry>> {
        self.committed = Arc::clone(&self.pending);
        Arc::clone(&self.committed)
    }
}

struct StoreCell<S> {
    state: Option<S>,
    reducer: ReducerFn<S>,
}

/// The core store. Cheap to clone; all clones share one state tree.
pub struct Store<S> {
    cell: Arc<Mutex<StoreCell<S>>>,
    listeners: Arc<Mutex<ListenerSet>>,
    /// True only while a reducer invocation is in flight.
    reducing: Arc<AtomicBool>,
}

impl<S> Clone for Store<S> {
    fn clone(&self) -> Self {
        Self {
            cell: Arc::clone(&self.cell),
            listeners: Arc::clone(&self.listeners),
            reducing: Arc::clone(&self.reducing),
        }
    }
}

impl<S> fmt::Debug for Store<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("reducing", &self.reducing.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

impl<S: Clone + Send + Sync + 'static> Store<S> {
    /// Create a store and establish the initial state tree with one
    /// synthetic initialization dispatch, so `get_state` is defined from the
    /// moment construction returns.
    pub fn new(reducer: ReducerFn<S>) -> Result<Self, StoreError> {
        Self::with_state(reducer, None)
    }

    /// Create a store from a previously captured state snapshot, e.g. one an
    /// external persistence collaborator deserialized.
    pub fn with_state(reducer: ReducerFn<S>, preloaded: Option<S>) -> Result<Self, StoreError> {
        let store = Self {
            cell: Arc::new(Mutex::new(StoreCell {
                state: preloaded,
                reducer,
            })),
            listeners: Arc::new(Mutex::new(ListenerSet::default())),
            reducing: Arc::new(AtomicBool::new(false)),
        };
        store.dispatch(Action::of_type(internal::INIT.as_str()))?;
        Ok(store)
    }

    fn guard(&self, operation: &'static str) -> Result<(), StoreError> {
        if self.reducing.load(Ordering::SeqCst) {
            return Err(StoreError::Reentrancy { operation });
        }
        Ok(())
    }
}

impl<S: Clone + Send + Sync + 'static> StoreApi<S> for Store<S> {
    fn dispatch(&self, action: Action<S>) -> Result<Action<S>, StoreError> {
        let record = match &action {
            Action::Value(value) => ActionRecord::parse(value)?,
            Action::Thunk(_) => {
                return Err(StoreError::validation(
                    "cannot dispatch a thunk on a bare store; add the thunk enhancer",
                ))
            }
        };

        if self.reducing.swap(true, Ordering::SeqCst) {
            return Err(StoreError::Reentrancy {
                operation: "dispatch",
            });
        }
        let (reducer, previous) = {
            let cell = self.cell.lock();
            (Arc::clone(&cell.reducer), cell.state.clone())
        };
        // The lock is released while the reducer runs: a reducer that calls
        // back into the store must hit the reentrancy guard, not a deadlock.
        // The flag is cleared on every exit path, including a reducer panic.
        let next = {
            let _clear =
                scopeguard::guard((), |_| self.reducing.store(false, Ordering::SeqCst));
            reducer(previous, &record)
        }?;

        self.cell.lock().state = Some(next);
        let snapshot = self.listeners.lock().commit();
        for entry in snapshot.iter() {
            (entry.callback)();
        }
        Ok(action)
    }

    fn get_state(&self) -> Result<S, StoreError> {
        self.guard("get_state")?;
        self.cell
            .lock()
            .state
            .clone()
            .ok_or_else(|| StoreError::configuration("store state is not initialized"))
    }

    fn subscribe(&self, listener: Listener) -> Result<Subscription, StoreError> {
        self.guard("subscribe")?;
        let id = self.listeners.lock().insert(listener);
        Ok(Subscription {
            listeners: Arc::downgrade(&self.listeners),
            reducing: Arc::clone(&self.reducing),
            id,
            subscribed: AtomicBool::new(true),
        })
    }

    fn replace_reducer(&self, next: ReducerFn<S>) -> Result<(), StoreError> {
        self.guard("replace_reducer")?;
        self.cell.lock().reducer = next;
        self.dispatch(Action::of_type(internal::REPLACE.as_str()))?;
        Ok(())
    }
}

/// Unsubscribe token returned by `subscribe`. Idempotent: unsubscribing
/// twice is a no-op, not an error.
pub struct Subscription {
    listeners: Weak<Mutex<ListenerSet>>,
    reducing: Arc<AtomicBool>,
    id: u64,
    subscribed: AtomicBool,
}

impl Subscription {
    /// Remove the listener from the pending list. Takes effect for the next
    /// dispatch; an in-flight notification still uses its snapshot.
    pub fn unsubscribe(&self) -> Result<(), StoreError> {
        if !self.subscribed.load(Ordering::SeqCst) {
            return Ok(());
        }
        if self.reducing.load(Ordering::SeqCst) {
            return Err(StoreError::Reentrancy {
                operation: "unsubscribe",
            });
        }
        self.subscribed.store(false, Ordering::SeqCst);
        if let Some(listeners) = self.listeners.upgrade() {
            listeners.lock().remove(self.id);
        }
        Ok(())
    }

    /// Whether the listener is still registered.
    pub fn is_subscribed(&self) -> bool {
        self.subscribed.load(Ordering::SeqCst)
    }
}
