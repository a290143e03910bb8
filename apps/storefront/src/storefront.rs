//! # Storefront Context
//!
//! Everything a UI entry point needs, passed explicitly instead of living in
//! globals.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │  Storefront (Clone, cheap)                                           │
//! │                                                                      │
//! │  store  ─── StoreState ─── Arc<Mutex<Store>>                         │
//! │                             └── renderers subscribed at construction │
//! │  popup  ─── PopupNotifier ─ renders into the same target             │
//! │  panel  ─── CartPanel                                                │
//! │  config ─── Arc<StorefrontConfig>                                    │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use kirana_core::{Action, CurrencyFormat, Reducer, Store, StoreError};

use crate::popup::PopupNotifier;
use crate::render::{self, RecordingTarget, SharedTarget};
use crate::state::{CartPanel, StoreState, StorefrontConfig};

#[derive(Debug, Clone)]
pub struct Storefront {
    store: StoreState,
    popup: PopupNotifier,
    panel: CartPanel,
    config: Arc<StorefrontConfig>,
}

impl Storefront {
    /// Builds the store with the configured stock policy and subscribes the
    /// catalog and cart renderers to `target`.
    pub fn new(config: StorefrontConfig, target: SharedTarget, panel: CartPanel) -> Self {
        let mut store = Store::new(Reducer::new(config.cart.stock_policy));
        render::subscribe_renderers(&mut store, target.clone(), config.currency.clone());

        Storefront {
            store: StoreState::new(store),
            popup: PopupNotifier::new(config.popup, Some(target)),
            panel,
            config: Arc::new(config),
        }
    }

    /// A storefront rendering into a [`RecordingTarget`], returned alongside.
    pub fn recording(config: StorefrontConfig) -> (Self, Arc<Mutex<RecordingTarget>>) {
        let recording = Arc::new(Mutex::new(RecordingTarget::default()));
        let shop = Storefront::new(config, recording.clone(), CartPanel::new());
        (shop, recording)
    }

    pub fn store(&self) -> &StoreState {
        &self.store
    }

    pub fn popup(&self) -> &PopupNotifier {
        &self.popup
    }

    pub fn panel(&self) -> &CartPanel {
        &self.panel
    }

    pub fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    pub fn currency(&self) -> &CurrencyFormat {
        &self.config.currency
    }

    pub fn dispatch(&self, action: Action) -> Result<(), StoreError> {
        self.store.dispatch(action)
    }
}
