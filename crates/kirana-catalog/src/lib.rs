//! # kirana-catalog: Catalog Loader
//!
//! Fetches the static product list once at startup and turns the outcome
//! into an action for the store.
//!
//! ## Load Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Catalog Load                                     │
//! │                                                                         │
//! │  CatalogSource ── "products.json" ──► tokio::fs::read                   │
//! │               └── "https://.../products.json" ──► reqwest GET           │
//! │                              │                                          │
//! │                              ▼                                          │
//! │                    parse_catalog(bytes)                                 │
//! │                              │                                          │
//! │            ┌─────────────────┴─────────────────┐                        │
//! │            ▼ Ok                                ▼ Err                    │
//! │   Action::SetProducts(products)      Action::LoadFailed { reason }      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! One attempt, no retry, no cancellation. The optional timeout bounds the
//! whole fetch-and-read.

pub mod error;
pub mod loader;
pub mod source;

pub use error::{CatalogError, CatalogResult};
pub use loader::{parse_catalog, CatalogLoader, CatalogSnapshot};
pub use source::CatalogSource;

/// Catalog file name used when nothing is configured.
pub const DEFAULT_CATALOG: &str = "products.json";
