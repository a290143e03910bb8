//! # kirana-core: State Container for the Kirana Storefront
//!
//! This crate is the **heart** of the storefront. It holds the catalog and
//! cart state, applies every user action through a single reducer, and
//! projects state into render records. There is no I/O here.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Kirana Storefront Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Host (kirana-storefront)                     │   │
//! │  │    add_to_cart ─ increase ─ decrease ─ remove ─ load_catalog    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Action                                 │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ kirana-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   store   │─►│  reducer  │─►│   types   │─►│   view    │  │   │
//! │  │   │ dispatch  │  │ (s,a)→s'  │  │  State    │  │ CartView  │  │   │
//! │  │   │ subscribe │  │ stock mgmt│  │  CartItem │  │ ProductCard│ │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO TIMERS • NO NETWORK • PURE TRANSITIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, CartItem, State)
//! - [`money`] - Money type with integer arithmetic
//! - [`action`] - Action variants and their `{type, payload}` wire form
//! - [`reducer`] - The pure `(state, action) → state` transition function
//! - [`store`] - State holder, dispatch loop and subscribers
//! - [`view`] - State → render record projections
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use kirana_core::{Action, Money, Product, ProductId, Reducer, Store};
//!
//! let mut store = Store::new(Reducer::default());
//! let tea = Product::new(ProductId::new(1), "Tea", Money::from_major_minor(10, 0), 5);
//!
//! store.dispatch(Action::SetProducts(vec![tea.clone()])).unwrap();
//! store.dispatch(Action::AddToCart(tea)).unwrap();
//!
//! assert_eq!(store.state().cart_quantity(ProductId::new(1)), 1);
//! assert_eq!(store.state().product(ProductId::new(1)).unwrap().stock, 4);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod action;
pub mod error;
pub mod money;
pub mod reducer;
pub mod store;
pub mod types;
pub mod view;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use action::Action;
pub use error::{CoreError, CoreResult, StoreError};
pub use money::Money;
pub use reducer::{reduce, Reducer, StockPolicy};
pub use store::{Dispatcher, Listener, Store};
pub use types::*;
pub use view::{CartLine, CartView, CatalogView, CurrencyFormat, ProductCard};
