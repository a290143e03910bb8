//! # Actions
//!
//! Tagged descriptions of intended state transitions.
//!
//! ## Wire Form
//! Actions travel between the view layer and the store as
//! `{"type": TAG, "payload": ...}`:
//!
//! ```text
//! ┌──────────────────────┬──────────────────────────────────────────────┐
//! │ type                 │ payload                                      │
//! ├──────────────────────┼──────────────────────────────────────────────┤
//! │ SET_PRODUCTS         │ [Product, ...]                               │
//! │ ADD_TO_CART          │ Product (full snapshot, not just the id)     │
//! │ INCREASE_QUANTITY    │ {"id": 1}                                    │
//! │ DECREASE_QUANTITY    │ {"id": 1}                                    │
//! │ REMOVE_FROM_CART     │ 1                                            │
//! │ LOAD_FAILED          │ {"reason": "..."}                            │
//! │ anything else        │ ignored → Action::Unrecognized               │
//! └──────────────────────┴──────────────────────────────────────────────┘
//! ```
//!
//! Decoding never fails on an unknown tag; the reducer treats
//! [`Action::Unrecognized`] as a no-op transition.

use serde::de::Error as _;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::types::{Product, ProductId};

/// Action tags as they appear on the wire.
pub mod tags {
    pub const SET_PRODUCTS: &str = "SET_PRODUCTS";
    pub const ADD_TO_CART: &str = "ADD_TO_CART";
    pub const INCREASE_QUANTITY: &str = "INCREASE_QUANTITY";
    pub const DECREASE_QUANTITY: &str = "DECREASE_QUANTITY";
    pub const REMOVE_FROM_CART: &str = "REMOVE_FROM_CART";
    pub const LOAD_FAILED: &str = "LOAD_FAILED";
}

/// A state transition request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Replace the catalog wholesale.
    SetProducts(Vec<Product>),

    /// Add one unit of the product. Carries the snapshot taken at lookup time.
    AddToCart(Product),

    /// One more unit of a product already in the cart.
    IncreaseQuantity { id: ProductId },

    /// One less unit; the line disappears at zero.
    DecreaseQuantity { id: ProductId },

    /// Drop the line and return its whole quantity to stock.
    RemoveFromCart(ProductId),

    /// The catalog load failed.
    LoadFailed { reason: String },

    /// Any tag this build does not know. Payload is discarded.
    Unrecognized { kind: String },
}

impl Action {
    /// Returns the wire tag, used for logging and error context.
    pub fn kind(&self) -> &str {
        match self {
            Action::SetProducts(_) => tags::SET_PRODUCTS,
            Action::AddToCart(_) => tags::ADD_TO_CART,
            Action::IncreaseQuantity { .. } => tags::INCREASE_QUANTITY,
            Action::DecreaseQuantity { .. } => tags::DECREASE_QUANTITY,
            Action::RemoveFromCart(_) => tags::REMOVE_FROM_CART,
            Action::LoadFailed { .. } => tags::LOAD_FAILED,
            Action::Unrecognized { kind } => kind.as_str(),
        }
    }
}

// =============================================================================
// Wire Form
// =============================================================================

#[derive(Serialize, Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    payload: Value,
}

#[derive(Serialize, Deserialize)]
struct IdPayload {
    id: ProductId,
}

#[derive(Serialize, Deserialize)]
struct ReasonPayload {
    reason: String,
}

impl Serialize for Action {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let payload = match self {
            Action::SetProducts(products) => serde_json::to_value(products),
            Action::AddToCart(product) => serde_json::to_value(product),
            Action::IncreaseQuantity { id } | Action::DecreaseQuantity { id } => {
                serde_json::to_value(IdPayload { id: *id })
            }
            Action::RemoveFromCart(id) => serde_json::to_value(id),
            Action::LoadFailed { reason } => serde_json::to_value(ReasonPayload {
                reason: reason.clone(),
            }),
            Action::Unrecognized { .. } => Ok(Value::Null),
        }
        .map_err(S::Error::custom)?;

        Envelope {
            kind: self.kind().to_string(),
            payload,
        }
        .serialize(serializer)
    }
}

fn decode<T: serde::de::DeserializeOwned>(kind: &str, payload: Value) -> Result<T, String> {
    serde_json::from_value(payload).map_err(|e| format!("invalid {} payload: {}", kind, e))
}

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let Envelope { kind, payload } = Envelope::deserialize(deserializer)?;

        let action = match kind.as_str() {
            tags::SET_PRODUCTS => decode(&kind, payload).map(Action::SetProducts),
            tags::ADD_TO_CART => decode(&kind, payload).map(Action::AddToCart),
            tags::INCREASE_QUANTITY => decode(&kind, payload)
                .map(|IdPayload { id }| Action::IncreaseQuantity { id }),
            tags::DECREASE_QUANTITY => decode(&kind, payload)
                .map(|IdPayload { id }| Action::DecreaseQuantity { id }),
            tags::REMOVE_FROM_CART => decode(&kind, payload).map(Action::RemoveFromCart),
            tags::LOAD_FAILED => {
                decode(&kind, payload).map(|ReasonPayload { reason }| Action::LoadFailed { reason })
            }
            _ => Ok(Action::Unrecognized { kind: kind.clone() }),
        };
        action.map_err(D::Error::custom)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
