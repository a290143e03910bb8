//! # Catalog Commands
//!
//! ```text
//! startup ──► load_catalog() ── fire and forget
//!                 │
//!                 ├── Ok   ──► SET_PRODUCTS  ──► catalog renders, cart renders
//!                 └── Err  ──► LOAD_FAILED   ──► catalog renders the reason
//! ```

use tracing::{debug, info, warn};

use kirana_core::view::catalog_view;
use kirana_core::{Action, CatalogView, Product};

use crate::error::ApiError;
use crate::Storefront;

/// Gets the product list as rendered.
pub fn get_catalog(shop: &Storefront) -> CatalogView {
    debug!("get_catalog command");
    shop.store()
        .with_store(|s| catalog_view(s.state(), shop.currency()))
}

/// Replaces the catalog. The cart is left as is.
pub fn set_products(shop: &Storefront, products: Vec<Product>) -> Result<CatalogView, ApiError> {
    debug!(count = products.len(), "set_products command");
    shop.dispatch(Action::SetProducts(products))?;
    Ok(get_catalog(shop))
}

/// Loads the configured catalog and dispatches the outcome.
///
/// A failed load still reaches the store as `LOAD_FAILED`, so the catalog
/// region shows the failure. The error is also returned for the caller.
pub async fn load_catalog(shop: &Storefront) -> Result<CatalogView, ApiError> {
    let action = match shop.config().catalog.loader() {
        Ok(loader) => {
            info!(source = %loader.source(), "Loading catalog");
            loader.load().await
        }
        Err(e) => {
            warn!(error = %e, "Catalog source unusable");
            Action::LoadFailed {
                reason: e.to_string(),
            }
        }
    };

    let failure = match &action {
        Action::LoadFailed { reason } => Some(reason.clone()),
        _ => None,
    };

    shop.dispatch(action)?;

    match failure {
        Some(reason) => Err(ApiError::catalog(reason)),
        None => Ok(get_catalog(shop)),
    }
}
