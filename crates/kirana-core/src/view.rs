//! # View Models
//!
//! Pure projections from [`State`] to render records. Render targets
//! re-draw a whole region from these on every notification; nothing here
//! knows about markup.
//!
//! ```text
//! State.products ──► catalog_view() ──► CatalogView { cards: [ProductCard] }
//! State.cart     ──► cart_view()    ──► CartView { lines: [CartLine], total }
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{CartItem, CatalogStatus, Product, ProductId, State};

/// Label shown instead of the stock count, and on the disabled button.
pub const OUT_OF_STOCK: &str = "Out of Stock";

/// Button label while a product can be added.
pub const ADD_TO_CART: &str = "Add to Cart";

// =============================================================================
// Currency Format
// =============================================================================

/// How amounts are rendered: `₹10`, `₹10.50`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyFormat {
    /// Symbol placed before the amount.
    pub symbol: String,

    /// Render `₹10.00` instead of `₹10` for whole amounts.
    #[serde(default)]
    pub always_show_minor: bool,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        CurrencyFormat {
            symbol: "₹".to_string(),
            always_show_minor: false,
        }
    }
}

impl CurrencyFormat {
    pub fn new(symbol: impl Into<String>) -> Self {
        CurrencyFormat {
            symbol: symbol.into(),
            always_show_minor: false,
        }
    }

    /// Formats an amount.
    ///
    /// ## Example
    /// ```rust
    /// use kirana_core::{CurrencyFormat, Money};
    ///
    /// let fmt = CurrencyFormat::default();
    /// assert_eq!(fmt.format(Money::from_major_minor(10, 0)), "₹10");
    /// assert_eq!(fmt.format(Money::from_major_minor(10, 5)), "₹10.05");
    /// ```
    pub fn format(&self, amount: Money) -> String {
        let sign = if amount.is_negative() { "-" } else { "" };
        if amount.is_whole() && !self.always_show_minor {
            format!("{}{}{}", sign, self.symbol, amount.major().abs())
        } else {
            format!(
                "{}{}{}.{:02}",
                sign,
                self.symbol,
                amount.major().abs(),
                amount.minor_part()
            )
        }
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// One product tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductCard {
    pub id: ProductId,
    pub name: String,
    pub image: String,
    pub price_label: String,
    /// Stock count, or "Out of Stock" when stock ≤ 0.
    pub stock_label: String,
    pub in_stock: bool,
    /// Whether the add button is clickable.
    pub add_enabled: bool,
    pub button_label: String,
}

impl ProductCard {
    pub fn from_product(product: &Product, currency: &CurrencyFormat) -> Self {
        let in_stock = product.in_stock();
        ProductCard {
            id: product.id,
            name: product.name.clone(),
            image: product.image.clone(),
            price_label: currency.format(product.price),
            stock_label: if in_stock {
                product.stock.to_string()
            } else {
                OUT_OF_STOCK.to_string()
            },
            in_stock,
            add_enabled: in_stock,
            button_label: if in_stock { ADD_TO_CART } else { OUT_OF_STOCK }.to_string(),
        }
    }
}

/// The product list region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CatalogView {
    pub cards: Vec<ProductCard>,
    pub status: CatalogStatus,
}

/// Projects the catalog region.
pub fn catalog_view(state: &State, currency: &CurrencyFormat) -> CatalogView {
    CatalogView {
        cards: state
            .products
            .iter()
            .map(|p| ProductCard::from_product(p, currency))
            .collect(),
        status: state.catalog.clone(),
    }
}

// =============================================================================
// Cart
// =============================================================================

/// One cart row with its −, +, Remove controls keyed by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLine {
    pub id: ProductId,
    pub name: String,
    pub image: String,
    /// "₹10 x 2"
    pub unit_label: String,
    #[ts(type = "number")]
    pub quantity: i64,
    pub line_total: String,
}

impl CartLine {
    pub fn from_item(item: &CartItem, currency: &CurrencyFormat) -> Self {
        CartLine {
            id: item.id(),
            name: item.product.name.clone(),
            image: item.product.image.clone(),
            unit_label: format!("{} x {}", currency.format(item.product.price), item.quantity),
            quantity: item.quantity,
            line_total: currency.format(item.line_total()),
        }
    }
}

/// The cart region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartView {
    pub lines: Vec<CartLine>,
    /// Major units on the wire, like `Product.price`.
    #[serde(with = "crate::money::major_units")]
    #[ts(type = "number")]
    pub total: Money,
    /// "Total: ₹30"
    pub total_label: String,
}

impl CartView {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Projects the cart region.
pub fn cart_view(state: &State, currency: &CurrencyFormat) -> CartView {
    let total = state.cart_total();
    CartView {
        lines: state
            .cart
            .iter()
            .map(|i| CartLine::from_item(i, currency))
            .collect(),
        total,
        total_label: format!("Total: {}", currency.format(total)),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use crate::reducer::reduce;

    fn state() -> State {
        let tea = Product::new(ProductId::new(1), "Tea", Money::from_major_minor(10, 0), 1)
            .with_image("tea.png");
        let salt = Product::new(ProductId::new(2), "Salt", Money::from_major_minor(2, 50), 0);
        let s = State::with_products(vec![tea.clone(), salt]);
        reduce(&s, &Action::AddToCart(tea)).unwrap()
    }

    #[test]
    fn test_currency_format() {
        let fmt = CurrencyFormat::default();
        assert_eq!(fmt.format(Money::zero()), "₹0");
        assert_eq!(fmt.format(Money::from_minor_units(-250)), "-₹2.50");

        let always = CurrencyFormat {
            symbol: "$".to_string(),
            always_show_minor: true,
        };
        assert_eq!(always.format(Money::from_major_minor(3, 0)), "$3.00");
    }

    #[test]
    fn test_catalog_cards_reflect_stock() {
        let view = catalog_view(&state(), &CurrencyFormat::default());
        assert_eq!(view.cards.len(), 2);
        assert_eq!(view.status, CatalogStatus::Loaded);

        // Tea had one unit and it is now in the cart.
        let tea = &view.cards[0];
        assert_eq!(tea.price_label, "₹10");
        assert_eq!(tea.stock_label, OUT_OF_STOCK);
        assert!(!tea.add_enabled);
        assert_eq!(tea.button_label, OUT_OF_STOCK);

        let salt = &view.cards[1];
        assert_eq!(salt.price_label, "₹2.50");
        assert!(!salt.in_stock);
    }

    #[test]
    fn test_in_stock_card() {
        let product = Product::new(ProductId::new(5), "Rice", Money::from_major_minor(60, 0), 12);
        let card = ProductCard::from_product(&product, &CurrencyFormat::default());
        assert_eq!(card.stock_label, "12");
        assert!(card.add_enabled);
        assert_eq!(card.button_label, ADD_TO_CART);
    }

    #[test]
    fn test_cart_view_lines_and_total() {
        let s = reduce(&state(), &Action::IncreaseQuantity { id: ProductId::new(1) }).unwrap();
        let view = cart_view(&s, &CurrencyFormat::default());

        assert_eq!(view.lines.len(), 1);
        assert_eq!(view.lines[0].unit_label, "₹10 x 2");
        assert_eq!(view.lines[0].line_total, "₹20");
        assert_eq!(view.lines[0].image, "tea.png");
        assert_eq!(view.total.minor_units(), 2000);
        assert_eq!(view.total_label, "Total: ₹20");
    }

    #[test]
    fn test_cart_total_serializes_in_major_units() {
        let view = cart_view(&state(), &CurrencyFormat::default());
        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(value["total"], 10);
        assert_eq!(value["lines"][0]["quantity"], 1);
    }

    #[test]
    fn test_huge_catalog_price_saturates_total() {
        let json = r#"[{"id": 9, "name": "Gold", "price": 50000000000000000, "stock": 5}]"#;
        let products: Vec<Product> = serde_json::from_str(json).unwrap();
        let gold = products[0].clone();

        let s = State::with_products(products);
        let s = reduce(&s, &Action::AddToCart(gold.clone())).unwrap();
        let s = reduce(&s, &Action::AddToCart(gold)).unwrap();

        let fmt = CurrencyFormat::default();
        let view = cart_view(&s, &fmt);
        assert_eq!(view.total, Money::MAX);
        assert_eq!(view.lines[0].line_total, fmt.format(Money::MAX));
        assert_eq!(s.product(ProductId::new(9)).unwrap().stock, 3);
    }

    #[test]
    fn test_empty_cart_view() {
        let view = cart_view(&State::new(), &CurrencyFormat::default());
        assert!(view.is_empty());
        assert_eq!(view.total_label, "Total: ₹0");
    }
}
