//! # Error Types
//!
//! Domain-specific error types for kirana-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  kirana-core errors (this file)                                        │
//! │  ├── CoreError        - Reducer rejected a transition                  │
//! │  └── StoreError       - Dispatch failed (wraps CoreError + action tag) │
//! │                                                                         │
//! │  kirana-catalog errors (separate crate)                                │
//! │  └── CatalogError     - Catalog fetch / decode failures                │
//! │                                                                         │
//! │  Storefront errors (in app)                                            │
//! │  └── ApiError         - What the view layer sees (serialized)          │
//! │                                                                         │
//! │  Flow: CoreError → StoreError → ApiError → View layer                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A rejected transition leaves the store untouched: no state replacement
//! and no subscriber notification.

use thiserror::Error;

use crate::types::ProductId;

// =============================================================================
// Core Error
// =============================================================================

/// Reducer errors.
///
/// Each variant is a transition the reducer refused to apply.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The product is not part of the current catalog.
    ///
    /// ## When This Occurs
    /// - `ADD_TO_CART` with a snapshot whose id is absent from `products`
    /// - The host looked up an id the catalog never contained
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// The product has no line in the cart.
    ///
    /// ## When This Occurs
    /// - `INCREASE_QUANTITY` / `DECREASE_QUANTITY` on an id never added
    /// - `REMOVE_FROM_CART` on an id never added, or already removed
    #[error("Product {0} is not in the cart")]
    NotInCart(ProductId),

    /// Not enough stock, raised only under [`StockPolicy::RejectOversell`].
    ///
    /// [`StockPolicy::RejectOversell`]: crate::reducer::StockPolicy::RejectOversell
    #[error("Insufficient stock for product {id}: available {available}, requested {requested}")]
    InsufficientStock {
        id: ProductId,
        available: i64,
        requested: i64,
    },
}

// =============================================================================
// Store Error
// =============================================================================

/// Dispatch failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The reducer rejected the action; state was left unchanged.
    #[error("{action} rejected: {source}")]
    Rejected {
        action: String,
        #[source]
        source: CoreError,
    },
}

impl StoreError {
    /// Returns the reducer error behind this dispatch failure.
    pub fn core(&self) -> &CoreError {
        match self {
            StoreError::Rejected { source, .. } => source,
        }
    }

    /// Returns the tag of the action that failed.
    pub fn action(&self) -> &str {
        match self {
            StoreError::Rejected { action, .. } => action,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            id: ProductId::new(7),
            available: 0,
            requested: 1,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for product 7: available 0, requested 1"
        );
        assert_eq!(
            CoreError::NotInCart(ProductId::new(3)).to_string(),
            "Product 3 is not in the cart"
        );
    }

    #[test]
    fn test_store_error_exposes_source() {
        let err = StoreError::Rejected {
            action: "REMOVE_FROM_CART".to_string(),
            source: CoreError::NotInCart(ProductId::new(9)),
        };
        assert_eq!(err.action(), "REMOVE_FROM_CART");
        assert_eq!(err.core(), &CoreError::NotInCart(ProductId::new(9)));
        assert_eq!(
            err.to_string(),
            "REMOVE_FROM_CART rejected: Product 9 is not in the cart"
        );
    }
}
