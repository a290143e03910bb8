//! # Store
//!
//! Holds the current [`State`], runs actions through the [`Reducer`] and
//! notifies subscribers.
//!
//! ## Dispatch Loop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Store::dispatch(action)                         │
//! │                                                                         │
//! │   reducer.reduce(&state, &action)                                       │
//! │        │                                                                │
//! │        ├── Err ──► return StoreError (state kept, nobody notified)      │
//! │        │                                                                │
//! │        ▼ Ok(next)                                                       │
//! │   state = next                                                          │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   listener_1(&state, &dispatcher)   (registration order)                │
//! │   listener_2(&state, &dispatcher)                                       │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   drain queued actions (FIFO) ──► same loop for each                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Re-entrancy
//! `dispatch` takes `&mut self`, so a listener can neither call it directly
//! nor add or remove listeners while a notification pass is running. The
//! listener list seen by a pass is fixed for that pass. A listener that
//! wants to dispatch uses the [`Dispatcher`] it is handed; those actions run
//! after the current pass, in the order they were queued.
//!
//! A listener that queues an action on every notification never lets
//! `dispatch` return.

use std::fmt;
use std::sync::mpsc::{self, Receiver, Sender};
use tracing::{debug, warn};

use crate::action::Action;
use crate::error::StoreError;
use crate::reducer::Reducer;
use crate::types::State;

/// A subscriber callback.
pub type Listener = Box<dyn FnMut(&State, &Dispatcher) + Send>;

// =============================================================================
// Dispatcher
// =============================================================================

/// Handle for queueing actions to a [`Store`].
///
/// Cloneable and `Send`, so it can be moved into listeners or tasks.
#[derive(Clone, Debug)]
pub struct Dispatcher {
    action_tx: Sender<Action>,
}

impl Dispatcher {
    /// Queues an action. It runs on the store's next drain.
    pub fn dispatch(&self, action: Action) {
        if let Err(e) = self.action_tx.send(action) {
            warn!("Dispatcher: store is gone, dropping {}", e.0.kind());
        }
    }
}

// =============================================================================
// Store
// =============================================================================

/// Single source of truth for [`State`].
pub struct Store {
    state: State,
    reducer: Reducer,
    listeners: Vec<Listener>,
    dispatcher: Dispatcher,
    queue: Receiver<Action>,
}

impl Store {
    /// Creates a store holding the startup state.
    pub fn new(reducer: Reducer) -> Self {
        Self::with_state(State::new(), reducer)
    }

    /// Creates a store holding `state`.
    pub fn with_state(state: State, reducer: Reducer) -> Self {
        let (action_tx, queue) = mpsc::channel();
        Store {
            state,
            reducer,
            listeners: Vec::new(),
            dispatcher: Dispatcher { action_tx },
            queue,
        }
    }

    /// Current state.
    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn reducer(&self) -> &Reducer {
        &self.reducer
    }

    /// Returns a handle that queues actions for this store.
    pub fn dispatcher(&self) -> Dispatcher {
        self.dispatcher.clone()
    }

    /// Registers a listener. Called after every successful transition.
    ///
    /// No duplicate detection: subscribing the same logic twice runs it twice.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&State, &Dispatcher) + Send + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Applies `action`, notifies listeners, then drains queued actions.
    ///
    /// Returns the outcome of `action` itself. Failures of queued actions
    /// are logged and do not stop the remaining queue.
    pub fn dispatch(&mut self, action: Action) -> Result<(), StoreError> {
        let result = self.apply(action);
        self.drain();
        result
    }

    fn apply(&mut self, action: Action) -> Result<(), StoreError> {
        let next = self
            .reducer
            .reduce(&self.state, &action)
            .map_err(|source| StoreError::Rejected {
                action: action.kind().to_string(),
                source,
            })?;

        self.state = next;
        debug!(
            action = action.kind(),
            cart_lines = self.state.cart.len(),
            listeners = self.listeners.len(),
            "State replaced"
        );

        for listener in self.listeners.iter_mut() {
            listener(&self.state, &self.dispatcher);
        }
        Ok(())
    }

    fn drain(&mut self) {
        while let Ok(action) = self.queue.try_recv() {
            if let Err(e) = self.apply(action) {
                warn!(error = %e, "Queued action rejected");
            }
        }
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("reducer", &self.reducer)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::money::Money;
    use crate::types::{Product, ProductId};
    use std::sync::{Arc, Mutex};

    const A: ProductId = ProductId::new(1);

    fn product_a() -> Product {
        Product::new(A, "A", Money::from_major_minor(10, 0), 5)
    }

    fn loaded_store() -> Store {
        Store::with_state(State::with_products(vec![product_a()]), Reducer::default())
    }

    #[test]
    fn test_listeners_run_in_registration_order() {
        let mut store = loaded_store();
        let calls = Arc::new(Mutex::new(Vec::new()));

        for name in ["products", "cart"] {
            let calls = Arc::clone(&calls);
            store.subscribe(move |_, _| calls.lock().unwrap().push(name));
        }

        store.dispatch(Action::AddToCart(product_a())).unwrap();
        assert_eq!(*calls.lock().unwrap(), vec!["products", "cart"]);
    }

    #[test]
    fn test_listener_sees_new_state() {
        let mut store = loaded_store();
        let seen = Arc::new(Mutex::new(None));

        let slot = Arc::clone(&seen);
        store.subscribe(move |state, _| {
            *slot.lock().unwrap() = Some((state.cart_quantity(A), state.product(A).unwrap().stock));
        });

        store.dispatch(Action::AddToCart(product_a())).unwrap();
        assert_eq!(*seen.lock().unwrap(), Some((1, 4)));
    }

    #[test]
    fn test_rejected_action_keeps_state_and_skips_listeners() {
        let mut store = loaded_store();
        let notified = Arc::new(Mutex::new(0));

        let counter = Arc::clone(&notified);
        store.subscribe(move |_, _| *counter.lock().unwrap() += 1);

        let before = store.state().clone();
        let err = store.dispatch(Action::RemoveFromCart(A)).unwrap_err();

        assert_eq!(err.core(), &CoreError::NotInCart(A));
        assert_eq!(err.action(), "REMOVE_FROM_CART");
        assert_eq!(store.state(), &before);
        assert_eq!(*notified.lock().unwrap(), 0);
    }

    #[test]
    fn test_listener_dispatch_is_processed_after_the_pass() {
        let mut store = loaded_store();
        let log = Arc::new(Mutex::new(Vec::new()));

        // The first listener asks for one more unit after the initial add.
        let first = Arc::clone(&log);
        store.subscribe(move |state, dispatcher| {
            let qty = state.cart_quantity(A);
            first.lock().unwrap().push(format!("first:{}", qty));
            if qty == 1 {
                dispatcher.dispatch(Action::IncreaseQuantity { id: A });
            }
        });
        let second = Arc::clone(&log);
        store.subscribe(move |state, _| {
            second
                .lock()
                .unwrap()
                .push(format!("second:{}", state.cart_quantity(A)));
        });

        store.dispatch(Action::AddToCart(product_a())).unwrap();

        assert_eq!(
            *log.lock().unwrap(),
            vec!["first:1", "second:1", "first:2", "second:2"]
        );
        assert_eq!(store.state().cart_quantity(A), 2);
        assert_eq!(store.state().product(A).unwrap().stock, 3);
    }

    #[test]
    fn test_external_dispatcher_is_drained_on_next_dispatch() {
        let mut store = loaded_store();
        let handle = store.dispatcher();

        handle.dispatch(Action::IncreaseQuantity { id: A });
        // Queued before any line exists: applied after ADD_TO_CART below.
        store.dispatch(Action::AddToCart(product_a())).unwrap();

        assert_eq!(store.state().cart_quantity(A), 2);
    }

    #[test]
    fn test_failed_queued_action_does_not_stop_the_queue() {
        let mut store = loaded_store();
        let handle = store.dispatcher();

        handle.dispatch(Action::RemoveFromCart(ProductId::new(42)));
        handle.dispatch(Action::IncreaseQuantity { id: A });

        store.dispatch(Action::AddToCart(product_a())).unwrap();
        assert_eq!(store.state().cart_quantity(A), 2);
    }

    #[test]
    fn test_unrecognized_action_still_notifies() {
        let mut store = loaded_store();
        let notified = Arc::new(Mutex::new(0));

        let counter = Arc::clone(&notified);
        store.subscribe(move |_, _| *counter.lock().unwrap() += 1);

        let before = store.state().clone();
        store
            .dispatch(Action::Unrecognized {
                kind: "NOOP".to_string(),
            })
            .unwrap();

        assert_eq!(store.state(), &before);
        assert_eq!(*notified.lock().unwrap(), 1);
        assert_eq!(store.listener_count(), 1);
    }
}
