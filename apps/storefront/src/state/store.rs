//! # Store State
//!
//! Shares the single [`Store`] between the command layer, the catalog
//! task and the console loop.
//!
//! ## Thread Safety
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Store State Operations                               │
//! │                                                                         │
//! │  Caller                   StoreState              Store                 │
//! │  ──────                   ──────────              ─────                 │
//! │                                                                         │
//! │  add_to_cart() ─────────► dispatch() ───────────► reduce + notify      │
//! │                                                                         │
//! │  catalog task ──────────► dispatch() ───────────► reduce + notify      │
//! │                                                                         │
//! │  get_cart() ────────────► with_store() ─────────► (read only)          │
//! │                                                                         │
//! │  NOTE: every call holds the Mutex for its whole duration, listeners    │
//! │        included, so dispatches are applied one at a time.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use kirana_core::{Action, State, Store, StoreError};

/// Shared handle to the store.
#[derive(Debug, Clone)]
pub struct StoreState {
    store: Arc<Mutex<Store>>,
}

impl StoreState {
    pub fn new(store: Store) -> Self {
        StoreState {
            store: Arc::new(Mutex::new(store)),
        }
    }

    // A listener that panicked leaves the store at its last committed state,
    // which is still consistent.
    fn lock(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Executes a function with read access to the store.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let count = store_state.with_store(|s| s.state().cart.len());
    /// ```
    pub fn with_store<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Store) -> R,
    {
        let store = self.lock();
        f(&store)
    }

    /// Executes a function with write access to the store.
    pub fn with_store_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Store) -> R,
    {
        let mut store = self.lock();
        f(&mut store)
    }

    pub fn dispatch(&self, action: Action) -> Result<(), StoreError> {
        self.with_store_mut(|s| s.dispatch(action))
    }

    /// Clones the current state.
    pub fn snapshot(&self) -> State {
        self.with_store(|s| s.state().clone())
    }
}
