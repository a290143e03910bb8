//! # Reducer
//!
//! The pure `(state, action) → state` function that owns all cart and stock
//! coupling.
//!
//! ## Transition Table
//! ```text
//! ┌────────────────────┬───────────────────────────────┬────────────────────┐
//! │ Action             │ Cart                          │ Stock of product   │
//! ├────────────────────┼───────────────────────────────┼────────────────────┤
//! │ SET_PRODUCTS       │ unchanged                     │ catalog replaced   │
//! │ LOAD_FAILED        │ unchanged                     │ unchanged          │
//! │ ADD_TO_CART        │ qty+1, or append {..p, qty:1} │ −1                 │
//! │ INCREASE_QUANTITY  │ qty+1                         │ −1                 │
//! │ DECREASE_QUANTITY  │ qty−1, drop lines at 0        │ +1                 │
//! │ REMOVE_FROM_CART   │ drop line                     │ +qty               │
//! │ (unrecognized)     │ unchanged                     │ unchanged          │
//! └────────────────────┴───────────────────────────────┴────────────────────┘
//! ```
//!
//! Every transition that moves units between cart and stock moves exactly
//! the same number in both directions, so stock + cart quantity is
//! conserved between two `SET_PRODUCTS`.
//!
//! ## Rejections
//! - cart operations on an id with no cart line → [`CoreError::NotInCart`]
//! - `ADD_TO_CART` for an id absent from the catalog → [`CoreError::ProductNotFound`]
//! - taking a unit at stock ≤ 0 under [`StockPolicy::RejectOversell`]
//!   → [`CoreError::InsufficientStock`]

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace};

use crate::action::Action;
use crate::error::{CoreError, CoreResult};
use crate::types::{CartItem, CatalogStatus, Product, ProductId, State};

// =============================================================================
// Stock Policy
// =============================================================================

/// Whether taking a unit may drive stock below zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockPolicy {
    /// Stock may go negative.
    #[default]
    AllowOversell,

    /// Refuse to take a unit once stock reaches zero.
    RejectOversell,
}

impl StockPolicy {
    /// Checks whether `requested` units may be taken from `available`.
    pub fn permits(&self, available: i64, requested: i64) -> bool {
        match self {
            StockPolicy::AllowOversell => true,
            StockPolicy::RejectOversell => available >= requested,
        }
    }
}

impl fmt::Display for StockPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockPolicy::AllowOversell => write!(f, "allow_oversell"),
            StockPolicy::RejectOversell => write!(f, "reject_oversell"),
        }
    }
}

impl FromStr for StockPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "allow_oversell" | "allow" | "oversell" => Ok(StockPolicy::AllowOversell),
            "reject_oversell" | "reject" | "strict" => Ok(StockPolicy::RejectOversell),
            other => Err(format!(
                "Unknown stock policy: '{}'. Valid options: allow_oversell, reject_oversell",
                other
            )),
        }
    }
}

// =============================================================================
// Reducer
// =============================================================================

/// The transition function, parameterized by a [`StockPolicy`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reducer {
    policy: StockPolicy,
}

impl Reducer {
    pub fn new(policy: StockPolicy) -> Self {
        Reducer { policy }
    }

    pub fn policy(&self) -> StockPolicy {
        self.policy
    }

    /// Computes the next state. Never mutates `state`.
    pub fn reduce(&self, state: &State, action: &Action) -> CoreResult<State> {
        trace!(action = action.kind(), "reducing");

        match action {
            Action::SetProducts(products) => Ok(State {
                cart: state.cart.clone(),
                products: products.clone(),
                catalog: CatalogStatus::Loaded,
            }),

            Action::LoadFailed { reason } => Ok(State {
                cart: state.cart.clone(),
                products: state.products.clone(),
                catalog: CatalogStatus::Failed {
                    reason: reason.clone(),
                },
            }),

            Action::AddToCart(product) => self.add_to_cart(state, product),

            Action::IncreaseQuantity { id } => self.increase_quantity(state, *id),

            Action::DecreaseQuantity { id } => Self::decrease_quantity(state, *id),

            Action::RemoveFromCart(id) => Self::remove_from_cart(state, *id),

            Action::Unrecognized { kind } => {
                debug!(action = %kind, "Ignoring unrecognized action");
                Ok(state.clone())
            }
        }
    }

    fn add_to_cart(&self, state: &State, product: &Product) -> CoreResult<State> {
        let current = state
            .product(product.id)
            .ok_or(CoreError::ProductNotFound(product.id))?;
        self.check_stock(product.id, current.stock)?;

        let mut cart = state.cart.clone();
        match cart.iter_mut().find(|i| i.id() == product.id) {
            Some(item) => item.quantity = item.quantity.saturating_add(1),
            None => cart.push(CartItem::from_product(product)),
        }

        debug!(product_id = %product.id, stock = current.stock.saturating_sub(1), "Added to cart");
        Ok(State {
            cart,
            products: adjust_stock(&state.products, product.id, -1),
            catalog: state.catalog.clone(),
        })
    }

    fn increase_quantity(&self, state: &State, id: ProductId) -> CoreResult<State> {
        if state.cart_item(id).is_none() {
            return Err(CoreError::NotInCart(id));
        }
        let available = state.product(id).map(|p| p.stock).unwrap_or(0);
        self.check_stock(id, available)?;

        let cart = state
            .cart
            .iter()
            .map(|i| {
                if i.id() == id {
                    CartItem {
                        quantity: i.quantity.saturating_add(1),
                        ..i.clone()
                    }
                } else {
                    i.clone()
                }
            })
            .collect();

        Ok(State {
            cart,
            products: adjust_stock(&state.products, id, -1),
            catalog: state.catalog.clone(),
        })
    }

    fn decrease_quantity(state: &State, id: ProductId) -> CoreResult<State> {
        if state.cart_item(id).is_none() {
            return Err(CoreError::NotInCart(id));
        }

        let cart: Vec<CartItem> = state
            .cart
            .iter()
            .map(|i| {
                if i.id() == id {
                    CartItem {
                        quantity: i.quantity - 1,
                        ..i.clone()
                    }
                } else {
                    i.clone()
                }
            })
            .filter(|i| i.quantity > 0)
            .collect();

        if cart.len() < state.cart.len() {
            debug!(product_id = %id, "Cart line reached zero and was removed");
        }

        Ok(State {
            cart,
            products: adjust_stock(&state.products, id, 1),
            catalog: state.catalog.clone(),
        })
    }

    fn remove_from_cart(state: &State, id: ProductId) -> CoreResult<State> {
        let removed = state.cart_item(id).ok_or(CoreError::NotInCart(id))?;

        debug!(product_id = %id, returned = removed.quantity, "Removed from cart");
        Ok(State {
            cart: state.cart.iter().filter(|i| i.id() != id).cloned().collect(),
            products: adjust_stock(&state.products, id, removed.quantity),
            catalog: state.catalog.clone(),
        })
    }

    fn check_stock(&self, id: ProductId, available: i64) -> CoreResult<()> {
        if self.policy.permits(available, 1) {
            Ok(())
        } else {
            Err(CoreError::InsufficientStock {
                id,
                available,
                requested: 1,
            })
        }
    }
}

/// Reduces with the default [`StockPolicy::AllowOversell`] reducer.
pub fn reduce(state: &State, action: &Action) -> CoreResult<State> {
    Reducer::default().reduce(state, action)
}

/// Returns a copy of `products` with `change` applied to the stock of `id`.
///
/// A catalog without `id` comes back unchanged. Stock saturates at the i64
/// limits.
fn adjust_stock(products: &[Product], id: ProductId, change: i64) -> Vec<Product> {
    products
        .iter()
        .map(|p| {
            if p.id == id {
                Product {
                    stock: p.stock.saturating_add(change),
                    ..p.clone()
                }
            } else {
                p.clone()
            }
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    const A: ProductId = ProductId::new(1);
    const B: ProductId = ProductId::new(2);

    fn product_a() -> Product {
        Product::new(A, "A", Money::from_major_minor(10, 0), 5)
    }

    fn product_b() -> Product {
        Product::new(B, "B", Money::from_major_minor(3, 50), 2)
    }

    fn start() -> State {
        State::with_products(vec![product_a(), product_b()])
    }

    fn stock(state: &State, id: ProductId) -> i64 {
        state.product(id).unwrap().stock
    }

    fn apply(state: State, actions: &[Action]) -> State {
        actions
            .iter()
            .fold(state, |s, a| reduce(&s, a).unwrap())
    }

    #[test]
    fn test_scenario_add_add_decrease_decrease() {
        let s0 = State::with_products(vec![product_a()]);

        let s1 = reduce(&s0, &Action::AddToCart(product_a())).unwrap();
        assert_eq!(s1.cart.len(), 1);
        assert_eq!(s1.cart[0].quantity, 1);
        assert_eq!(stock(&s1, A), 4);

        let s2 = reduce(&s1, &Action::AddToCart(product_a())).unwrap();
        assert_eq!(s2.cart.len(), 1);
        assert_eq!(s2.cart[0].quantity, 2);
        assert_eq!(stock(&s2, A), 3);

        let s3 = reduce(&s2, &Action::DecreaseQuantity { id: A }).unwrap();
        assert_eq!(s3.cart[0].quantity, 1);
        assert_eq!(stock(&s3, A), 4);

        let s4 = reduce(&s3, &Action::DecreaseQuantity { id: A }).unwrap();
        assert!(s4.cart.is_empty());
        assert_eq!(stock(&s4, A), 5);
    }

    #[test]
    fn test_input_state_is_never_mutated() {
        let s0 = start();
        let before = s0.clone();
        let _ = reduce(&s0, &Action::AddToCart(product_a())).unwrap();
        assert_eq!(s0, before);
    }

    #[test]
    fn test_conservation_over_mixed_sequence() {
        let actions = [
            Action::AddToCart(product_a()),
            Action::IncreaseQuantity { id: A },
            Action::IncreaseQuantity { id: A },
            Action::AddToCart(product_b()),
            Action::DecreaseQuantity { id: A },
            Action::AddToCart(product_a()),
            Action::IncreaseQuantity { id: B },
            Action::DecreaseQuantity { id: B },
        ];

        let mut state = start();
        for action in &actions {
            state = reduce(&state, action).unwrap();
            assert_eq!(stock(&state, A) + state.cart_quantity(A), 5);
            assert_eq!(stock(&state, B) + state.cart_quantity(B), 2);
        }
        assert_eq!(state.cart_quantity(A), 3);
        assert_eq!(state.cart_quantity(B), 1);
    }

    #[test]
    fn test_add_keeps_insertion_order_and_first_snapshot() {
        let mut renamed = product_a();
        renamed.name = "A (new label)".to_string();

        let state = apply(
            start(),
            &[
                Action::AddToCart(product_b()),
                Action::AddToCart(product_a()),
                Action::AddToCart(renamed),
            ],
        );
        let ids: Vec<_> = state.cart.iter().map(CartItem::id).collect();
        assert_eq!(ids, vec![B, A]);
        assert_eq!(state.cart[1].product.name, "A");
        assert_eq!(state.cart[1].quantity, 2);
    }

    #[test]
    fn test_set_products_is_idempotent() {
        let with_cart = apply(start(), &[Action::AddToCart(product_a())]);
        let catalog = vec![product_a(), product_b()];

        let once = reduce(&with_cart, &Action::SetProducts(catalog.clone())).unwrap();
        let twice = reduce(&once, &Action::SetProducts(catalog.clone())).unwrap();

        assert_eq!(once, twice);
        assert_eq!(twice.cart, with_cart.cart);
        assert_eq!(twice.products, catalog);
        assert_eq!(twice.catalog, CatalogStatus::Loaded);
    }

    #[test]
    fn test_remove_returns_whole_quantity() {
        let state = apply(
            start(),
            &[
                Action::AddToCart(product_a()),
                Action::IncreaseQuantity { id: A },
                Action::IncreaseQuantity { id: A },
                Action::AddToCart(product_b()),
            ],
        );
        assert_eq!(stock(&state, A), 2);

        let removed = reduce(&state, &Action::RemoveFromCart(A)).unwrap();
        assert_eq!(stock(&removed, A), 5);
        assert_eq!(removed.cart.len(), state.cart.len() - 1);
        assert!(removed.cart_item(A).is_none());
        assert_eq!(removed.cart_quantity(B), 1);
    }

    #[test]
    fn test_remove_never_added_is_rejected() {
        let state = start();
        let err = reduce(&state, &Action::RemoveFromCart(A)).unwrap_err();
        assert_eq!(err, CoreError::NotInCart(A));
    }

    #[test]
    fn test_quantity_changes_on_absent_line_are_rejected() {
        let state = start();
        assert_eq!(
            reduce(&state, &Action::IncreaseQuantity { id: B }).unwrap_err(),
            CoreError::NotInCart(B)
        );
        assert_eq!(
            reduce(&state, &Action::DecreaseQuantity { id: B }).unwrap_err(),
            CoreError::NotInCart(B)
        );
    }

    #[test]
    fn test_add_unknown_product_is_rejected() {
        let ghost = Product::new(ProductId::new(99), "Ghost", Money::zero(), 1);
        let err = reduce(&start(), &Action::AddToCart(ghost)).unwrap_err();
        assert_eq!(err, CoreError::ProductNotFound(ProductId::new(99)));
    }

    #[test]
    fn test_allow_oversell_drives_stock_negative() {
        let state = apply(
            start(),
            &[
                Action::AddToCart(product_b()),
                Action::IncreaseQuantity { id: B },
                Action::IncreaseQuantity { id: B },
            ],
        );
        assert_eq!(stock(&state, B), -1);
        assert_eq!(state.cart_quantity(B), 3);
    }

    #[test]
    fn test_reject_oversell_stops_at_zero() {
        let reducer = Reducer::new(StockPolicy::RejectOversell);
        let s1 = reducer
            .reduce(&start(), &Action::AddToCart(product_b()))
            .unwrap();
        let s2 = reducer
            .reduce(&s1, &Action::IncreaseQuantity { id: B })
            .unwrap();
        assert_eq!(stock(&s2, B), 0);

        let err = reducer
            .reduce(&s2, &Action::IncreaseQuantity { id: B })
            .unwrap_err();
        assert_eq!(
            err,
            CoreError::InsufficientStock {
                id: B,
                available: 0,
                requested: 1
            }
        );
        assert!(reducer.reduce(&s2, &Action::AddToCart(product_b())).is_err());
    }

    #[test]
    fn test_unrecognized_action_returns_equal_state() {
        let state = apply(start(), &[Action::AddToCart(product_a())]);
        let next = reduce(
            &state,
            &Action::Unrecognized {
                kind: "APPLY_COUPON".to_string(),
            },
        )
        .unwrap();
        assert_eq!(next, state);
    }

    #[test]
    fn test_load_failed_keeps_products_and_cart() {
        let state = reduce(
            &State::new(),
            &Action::LoadFailed {
                reason: "connection refused".to_string(),
            },
        )
        .unwrap();
        assert!(state.products.is_empty());
        assert_eq!(
            state.catalog,
            CatalogStatus::Failed {
                reason: "connection refused".to_string()
            }
        );
    }

    #[test]
    fn test_stock_policy_parsing() {
        assert_eq!("allow_oversell".parse::<StockPolicy>().unwrap(), StockPolicy::AllowOversell);
        assert_eq!("STRICT".parse::<StockPolicy>().unwrap(), StockPolicy::RejectOversell);
        assert!("sometimes".parse::<StockPolicy>().is_err());
        assert_eq!(StockPolicy::RejectOversell.to_string(), "reject_oversell");
    }

    mod sequences {
        use super::*;
        use proptest::prelude::*;

        /// One cart control: 0 = add, 1 = +, 2 = -; applied to A or B.
        fn ops() -> impl Strategy<Value = Vec<(u8, bool)>> {
            prop::collection::vec((0u8..3, any::<bool>()), 0..40)
        }

        fn action_for(state: &State, op: u8, pick_b: bool) -> Option<Action> {
            let product = if pick_b { product_b() } else { product_a() };
            let in_cart = state.cart_item(product.id).is_some();
            match op {
                0 => Some(Action::AddToCart(product)),
                1 if in_cart => Some(Action::IncreaseQuantity { id: product.id }),
                2 if in_cart => Some(Action::DecreaseQuantity { id: product.id }),
                _ => None,
            }
        }

        fn run(ops: &[(u8, bool)]) -> State {
            let mut state = start();
            for &(op, pick_b) in ops {
                if let Some(action) = action_for(&state, op, pick_b) {
                    state = reduce(&state, &action).unwrap();
                    assert_eq!(stock(&state, A) + state.cart_quantity(A), 5);
                    assert_eq!(stock(&state, B) + state.cart_quantity(B), 2);
                }
            }
            state
        }

        proptest! {
            #[test]
            fn test_stock_plus_cart_is_conserved(ops in ops()) {
                let state = run(&ops);
                prop_assert!(state.cart.iter().all(|i| i.quantity >= 1));
            }

            #[test]
            fn test_decrease_to_zero_restores_stock(ops in ops()) {
                let mut state = run(&ops);
                for id in [A, B] {
                    while state.cart_item(id).is_some() {
                        state = reduce(&state, &Action::DecreaseQuantity { id }).unwrap();
                    }
                }
                prop_assert!(state.cart.is_empty());
                prop_assert_eq!(stock(&state, A), 5);
                prop_assert_eq!(stock(&state, B), 2);
            }
        }
    }
}
