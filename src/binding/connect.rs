//! Subscribing views to state slices.
//!
//! `connect` pairs a state selector with an action-creator map; mounting the
//! result against a provider subscribes the view to the store, derives its
//! props once synchronously, and re-derives them on every notification until
//! the binding is torn down.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use scopeguard::ScopeGuard;
use serde_json::{Map, Value};

use crate::bind::{bind_action_creator_map, ActionCreatorMap, BoundAction};
use crate::binding::provider::Provider;
use crate::error::StoreError;
use crate::store::{dispatcher, StoreHandle, Subscription};

/// Flat property record handed to a view on each render.
pub type Props = Map<String, Value>;

/// Derives a props subset from the full state tree.
pub type Selector<S> = Arc<dyn Fn(&S) -> Props + Send + Sync>;

/// Bound action creators handed to a view alongside its data props. (Rust
/// props records carry data only, so dispatch props travel as a separate
/// argument rather than being spread into the same object.)
pub type ActionProps<S> = BTreeMap<String, BoundAction<S>>;

/// Anything that accepts a flat property record and re-renders when asked.
pub trait View<S>: Send {
    fn render(&mut self, props: &Props, actions: &ActionProps<S>);
}

/// Lifecycle of a bound view. `Unsubscribed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingPhase {
    Unmounted,
    /// Subscribed; the one synchronous initial derivation has rendered.
    SubscribedInitial,
    /// Subscribed; at least one store notification has re-rendered the view.
    SubscribedUpdated,
    Unsubscribed,
}

/// Output of [`connect`]: mounts views against a provider.
pub struct Connector<S> {
    selector: Selector<S>,
    creators: ActionCreatorMap<S>,
}

/// Wire a state selector and an action-creator map into a mountable
/// connector.
pub fn connect<S>(selector: Selector<S>, creators: ActionCreatorMap<S>) -> Connector<S> {
    Connector { selector, creators }
}

struct BoundCell<S> {
    view: Box<dyn View<S>>,
    props: Props,
    phase: BindingPhase,
}

impl<S: Clone + Send + Sync + 'static> Connector<S> {
    /// Subscribe `view` to the provider's store and render it once,
    /// synchronously, with the initial derived props.
    ///
    /// The subscription is released on every exit path, including a failed
    /// initial derivation.
    pub fn mount(
        &self,
        provider: &Provider<S>,
        view: Box<dyn View<S>>,
    ) -> Result<BoundView<S>, StoreError> {
        let store = provider.store();
        let shared = Arc::new(Mutex::new(BoundCell {
            view,
            props: Props::new(),
            phase: BindingPhase::Unmounted,
        }));

        let listener = {
            let store = Arc::clone(&store);
            let shared = Arc::clone(&shared);
            let selector = Arc::clone(&self.selector);
            let creators = self.creators.clone();
            Arc::new(move || {
                let outcome = rederive(
                    &store,
                    &shared,
                    &selector,
                    &creators,
                    BindingPhase::SubscribedUpdated,
                );
                if let Err(error) = outcome {
                    tracing::warn!(%error, "bound view skipped an update");
                }
            }) as Arc<dyn Fn() + Send + Sync>
        };

        let subscription = store.subscribe(listener)?;
        let guard = scopeguard::guard(subscription, |subscription| {
            let _ = subscription.unsubscribe();
        });

        rederive(
            &store,
            &shared,
            &self.selector,
            &self.creators,
            BindingPhase::SubscribedInitial,
        )?;

        let subscription = ScopeGuard::into_inner(guard);
        Ok(BoundView {
            shared,
            subscription,
        })
    }
}

/// Merge `selector(state)` over the previous props, rebind the creators, and
/// render.
fn rederive<S: Clone + Send + Sync + 'static>(
    store: &StoreHandle<S>,
    shared: &Arc<Mutex<BoundCell<S>>>,
    selector: &Selector<S>,
    creators: &ActionCreatorMap<S>,
    phase: BindingPhase,
) -> Result<(), StoreError> {
    let state = store.get_state()?;
    let state_props = selector(&state);
    let actions = bind_action_creator_map(creators.clone(), dispatcher(store));

    // The cell lock is held across render: a view must not dispatch
    // synchronously from inside `render` (bound actions are for event
    // handlers, which run after the notification loop).
    let mut cell = shared.lock();
    if cell.phase == BindingPhase::Unsubscribed {
        return Ok(());
    }
    for (key, value) in state_props {
        cell.props.insert(key, value);
    }
    cell.phase = phase;
    let props = cell.props.clone();
    cell.view.render(&props, &actions);
    Ok(())
}

/// A mounted view: subscribed to the store until unmounted or dropped.
pub struct BoundView<S> {
    shared: Arc<Mutex<BoundCell<S>>>,
    subscription: Subscription,
}

impl<S> BoundView<S> {
    /// Current lifecycle phase.
    pub fn phase(&self) -> BindingPhase {
        self.shared.lock().phase
    }

    /// The props from the most recent render.
    pub fn props(&self) -> Props {
        self.shared.lock().props.clone()
    }

    /// Tear the binding down; the view stops receiving notifications.
    pub fn unmount(self) -> Result<(), StoreError> {
        self.subscription.unsubscribe()?;
        self.shared.lock().phase = BindingPhase::Unsubscribed;
        Ok(())
    }
}

impl<S> fmt::Debug for BoundView<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundView")
            .field("phase", &self.phase())
            .finish_non_exhaustive()
    }
}

impl<S> Drop for BoundView<S> {
    fn drop(&mut self) {
        // unsubscribe() is idempotent, so dropping after unmount is fine.
        let _ = self.subscription.unsubscribe();
        self.shared.lock().phase = BindingPhase::Unsubscribed;
    }
}
