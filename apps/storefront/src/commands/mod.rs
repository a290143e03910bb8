//! # Commands Module
//!
//! The storefront's UI entry points. Each one takes the [`Storefront`]
//! context explicitly, builds one action and dispatches it.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── cart.rs     ◄─── add / + / - / remove, cart panel toggle
//! └── catalog.rs  ◄─── catalog load and replacement
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  "Add to Cart" on product 3                                             │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  commands::add_to_cart(&shop, ProductId(3))                             │
//! │         │  look up product 3 in the current state                       │
//! │         │  dispatch ADD_TO_CART { product }                             │
//! │         │  show "Product added to cart!"                                │
//! │         ▼                                                               │
//! │  Result<CartResponse, ApiError>                                         │
//! │                                                                         │
//! │  Renderers already ran inside the dispatch; the response is for        │
//! │  callers that want the new cart without subscribing.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`Storefront`]: crate::Storefront

pub mod cart;
pub mod catalog;

pub use cart::{
    add_to_cart, decrease_quantity, get_cart, increase_quantity, remove_from_cart,
    toggle_cart_panel, CartResponse, CartTotals,
};
pub use catalog::{get_catalog, load_catalog, set_products};
