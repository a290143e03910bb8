//! # State Module
//!
//! Host-side state for the storefront.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────┐  ┌──────────────────┐  ┌──────────────────────┐  │
//! │  │   StoreState     │  │    CartPanel     │  │  StorefrontConfig    │  │
//! │  │                  │  │                  │  │                      │  │
//! │  │  Arc<Mutex<      │  │  Arc<AtomicBool> │  │  catalog source      │  │
//! │  │    Store         │  │  (open/closed)   │  │  popup timing        │  │
//! │  │  >>              │  │                  │  │  currency, policy    │  │
//! │  └──────────────────┘  └──────────────────┘  └──────────────────────┘  │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • StoreState: Protected by Arc<Mutex<T>> for exclusive access         │
//! │  • CartPanel: Atomic flag, never touches the store                     │
//! │  • StorefrontConfig: Read-only after initialization                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod panel;
mod store;

pub use config::{
    CartSettings, CatalogSettings, DisplaySettings, DisplayTarget, PopupSettings, StorefrontConfig,
    CONFIG_ENV,
};
pub use panel::CartPanel;
pub use store::StoreState;
