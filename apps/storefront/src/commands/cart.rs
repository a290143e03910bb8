//! # Cart Commands
//!
//! ## Cart Controls
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Product card                     Cart line                             │
//! │  ┌──────────────────┐             ┌──────────────────────────────────┐  │
//! │  │ Tea        ₹10   │             │ Tea   ₹10 x 2   [-] [+] [Remove] │  │
//! │  │ 4                │             └──────────────────────────────────┘  │
//! │  │ [Add to Cart] ───┼──► add_to_cart     [-] ──► decrease_quantity      │
//! │  └──────────────────┘                    [+] ──► increase_quantity      │
//! │                                     [Remove] ──► remove_from_cart       │
//! │                                                                         │
//! │  Cart icon ──► toggle_cart_panel (view state only)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::debug;

use kirana_core::view::cart_view;
use kirana_core::{Action, CartItem, CartView, Money, ProductId, State};

use crate::error::ApiError;
use crate::popup::ADDED_TO_CART;
use crate::Storefront;

/// Cart totals summary for API responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub item_count: usize,
    pub total_quantity: i64,
    /// Major units, like `Product.price`.
    #[serde(with = "kirana_core::money::major_units")]
    pub total: Money,
}

impl From<&State> for CartTotals {
    fn from(state: &State) -> Self {
        CartTotals {
            item_count: state.cart.len(),
            total_quantity: state.total_quantity(),
            total: state.cart_total(),
        }
    }
}

/// Cart response including items, totals and the rendered cart view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    pub totals: CartTotals,
    pub view: CartView,
}

impl CartResponse {
    fn from_shop(shop: &Storefront) -> Self {
        shop.store().with_store(|s| {
            let state = s.state();
            CartResponse {
                items: state.cart.clone(),
                totals: CartTotals::from(state),
                view: cart_view(state, shop.currency()),
            }
        })
    }
}

/// Gets the current cart contents.
pub fn get_cart(shop: &Storefront) -> CartResponse {
    debug!("get_cart command");
    CartResponse::from_shop(shop)
}

/// Adds one unit of a catalog product and shows the confirmation popup.
///
/// ## Behavior
/// - Product already in cart: quantity increases by one
/// - Product not in cart: added with quantity one
/// - Product unknown to the catalog: `NOT_FOUND`, nothing changes
///
/// The button is disabled for out-of-stock products, but the command itself
/// does not check stock unless the strict stock policy is configured.
pub fn add_to_cart(shop: &Storefront, id: ProductId) -> Result<CartResponse, ApiError> {
    debug!(product_id = %id, "add_to_cart command");

    let product = shop
        .store()
        .with_store(|s| s.state().product(id).cloned())
        .ok_or_else(|| ApiError::not_found("Product", &id.to_string()))?;

    shop.dispatch(Action::AddToCart(product))?;
    shop.popup().show(ADDED_TO_CART);

    Ok(CartResponse::from_shop(shop))
}

/// The `+` control on a cart line.
pub fn increase_quantity(shop: &Storefront, id: ProductId) -> Result<CartResponse, ApiError> {
    debug!(product_id = %id, "increase_quantity command");
    shop.dispatch(Action::IncreaseQuantity { id })?;
    Ok(CartResponse::from_shop(shop))
}

/// The `-` control on a cart line. At quantity one the line is removed.
pub fn decrease_quantity(shop: &Storefront, id: ProductId) -> Result<CartResponse, ApiError> {
    debug!(product_id = %id, "decrease_quantity command");
    shop.dispatch(Action::DecreaseQuantity { id })?;
    Ok(CartResponse::from_shop(shop))
}

/// The Remove control on a cart line. Returns the whole quantity to stock.
pub fn remove_from_cart(shop: &Storefront, id: ProductId) -> Result<CartResponse, ApiError> {
    debug!(product_id = %id, "remove_from_cart command");
    shop.dispatch(Action::RemoveFromCart(id))?;
    Ok(CartResponse::from_shop(shop))
}

/// Opens or closes the cart panel and returns whether it is now open.
pub fn toggle_cart_panel(shop: &Storefront) -> bool {
    shop.panel().toggle()
}
