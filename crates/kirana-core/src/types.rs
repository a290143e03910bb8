//! # Domain Types
//!
//! Core domain types used throughout the storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    CartItem     │   │     State       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │──►│  product (snap) │◄──│  cart           │       │
//! │  │  name           │   │  quantity ≥ 1   │   │  products       │       │
//! │  │  price (Money)  │   └─────────────────┘   │  catalog status │       │
//! │  │  image          │                         └─────────────────┘       │
//! │  │  stock          │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Stock Conservation
//! For every product, `initial stock == current stock + quantity in cart`
//! between two `SET_PRODUCTS`. Only the reducer moves units between the two.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Product Id
// =============================================================================

/// Catalog identifier. A bare number on the wire (`"id": 1`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(transparent)]
#[ts(export)]
pub struct ProductId(u32);

impl ProductId {
    #[inline]
    pub const fn new(id: u32) -> Self {
        ProductId(id)
    }

    #[inline]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        ProductId(id)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProductId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u32>().map(ProductId)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
///
/// Matches the catalog resource record `{id, name, price, image, stock}`.
/// `stock` is signed: under [`StockPolicy::AllowOversell`] repeated adds
/// past zero drive it negative.
///
/// [`StockPolicy::AllowOversell`]: crate::reducer::StockPolicy::AllowOversell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    pub id: ProductId,

    /// Display name.
    pub name: String,

    /// Unit price. Major units on the wire.
    #[serde(with = "crate::money::major_units")]
    #[ts(type = "number")]
    pub price: Money,

    /// Image URI.
    #[serde(default)]
    pub image: String,

    /// Units available for sale.
    #[ts(type = "number")]
    pub stock: i64,
}

impl Product {
    /// Creates a product without an image.
    pub fn new(id: ProductId, name: impl Into<String>, price: Money, stock: i64) -> Self {
        Product {
            id,
            name: name.into(),
            price,
            image: String::new(),
            stock,
        }
    }

    /// Sets the image URI.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Checks if at least one unit is available.
    #[inline]
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

// =============================================================================
// Cart Item
// =============================================================================

/// A line in the cart.
///
/// Uses the snapshot pattern: the product fields are frozen when the line
/// is first created. Later adds of the same id only bump `quantity`.
///
/// Serialized flat, `{...product, quantity}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,

    /// Always ≥ 1; lines reaching zero are dropped by the reducer.
    #[ts(type = "number")]
    pub quantity: i64,
}

impl CartItem {
    /// Creates a single-unit line from a product snapshot.
    pub fn from_product(product: &Product) -> Self {
        CartItem {
            product: product.clone(),
            quantity: 1,
        }
    }

    #[inline]
    pub fn id(&self) -> ProductId {
        self.product.id
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.product.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Catalog Status
// =============================================================================

/// Outcome of the catalog load.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(tag = "status", rename_all = "snake_case")]
#[ts(export)]
pub enum CatalogStatus {
    /// No load outcome yet.
    #[default]
    Pending,
    /// `SET_PRODUCTS` has been applied at least once.
    Loaded,
    /// The last load attempt failed.
    Failed { reason: String },
}

// =============================================================================
// State
// =============================================================================

/// The whole storefront state.
///
/// Immutable per dispatch: the reducer always builds a new value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct State {
    /// Cart lines in insertion order.
    pub cart: Vec<CartItem>,

    /// Catalog in resource order.
    pub products: Vec<Product>,

    #[serde(default)]
    pub catalog: CatalogStatus,
}

impl State {
    /// Creates the startup state: empty cart, empty catalog, load pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a state with a loaded catalog and an empty cart.
    pub fn with_products(products: Vec<Product>) -> Self {
        State {
            cart: Vec::new(),
            products,
            catalog: CatalogStatus::Loaded,
        }
    }

    /// Looks up a catalog product.
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Looks up a cart line.
    pub fn cart_item(&self, id: ProductId) -> Option<&CartItem> {
        self.cart.iter().find(|i| i.id() == id)
    }

    /// Quantity held in the cart for `id` (0 when absent).
    pub fn cart_quantity(&self, id: ProductId) -> i64 {
        self.cart_item(id).map(|i| i.quantity).unwrap_or(0)
    }

    /// Total units across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.cart.iter().fold(0i64, |acc, i| acc.saturating_add(i.quantity))
    }

    /// Σ price × quantity over the cart.
    pub fn cart_total(&self) -> Money {
        self.cart.iter().map(CartItem::line_total).sum()
    }

    pub fn is_cart_empty(&self) -> bool {
        self.cart.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
