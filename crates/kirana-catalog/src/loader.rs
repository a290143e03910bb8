//! # Catalog Loader
//!
//! Single-shot async load of the product list.
//!
//! ## Outcome
//! [`CatalogLoader::load`] never returns an error. It folds the outcome into
//! the action the host should dispatch:
//!
//! ```text
//! fetch() ── Ok(snapshot) ──► Action::SetProducts(snapshot.products)   (info)
//!         └─ Err(e) ────────► Action::LoadFailed { reason: e }          (warn)
//! ```

use chrono::{DateTime, Utc};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use kirana_core::{Action, Product};

use crate::error::{CatalogError, CatalogResult};
use crate::source::CatalogSource;

/// A successfully loaded catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSnapshot {
    pub products: Vec<Product>,
    /// Where it came from, for logs.
    pub source: String,
    pub loaded_at: DateTime<Utc>,
}

/// Decodes a catalog body: a JSON array of product records.
///
/// No schema validation beyond decoding.
pub fn parse_catalog(bytes: &[u8]) -> CatalogResult<Vec<Product>> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Loads a catalog from one source.
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    source: CatalogSource,
    timeout: Option<Duration>,
    client: reqwest::Client,
}

impl CatalogLoader {
    pub fn new(source: CatalogSource) -> Self {
        CatalogLoader {
            source,
            timeout: None,
            client: reqwest::Client::new(),
        }
    }

    /// Bounds the load. Without it the load waits as long as the transport does.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn source(&self) -> &CatalogSource {
        &self.source
    }

    /// Fetches and decodes the catalog.
    pub async fn fetch(&self) -> CatalogResult<CatalogSnapshot> {
        let started = Instant::now();
        let products = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.fetch_products())
                .await
                .map_err(|_| CatalogError::Timeout(limit))??,
            None => self.fetch_products().await?,
        };

        debug!(
            source = %self.source,
            count = products.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Catalog decoded"
        );

        Ok(CatalogSnapshot {
            products,
            source: self.source.to_string(),
            loaded_at: Utc::now(),
        })
    }

    /// Fetches the catalog and returns the action describing the outcome.
    pub async fn load(&self) -> Action {
        match self.fetch().await {
            Ok(snapshot) => {
                info!(
                    source = %snapshot.source,
                    count = snapshot.products.len(),
                    loaded_at = %snapshot.loaded_at,
                    "Catalog loaded"
                );
                Action::SetProducts(snapshot.products)
            }
            Err(e) => {
                warn!(source = %self.source, error = %e, "Catalog load failed");
                Action::LoadFailed {
                    reason: e.to_string(),
                }
            }
        }
    }

    async fn fetch_products(&self) -> CatalogResult<Vec<Product>> {
        let bytes = match &self.source {
            CatalogSource::File(path) => {
                tokio::fs::read(path)
                    .await
                    .map_err(|source| CatalogError::Io {
                        path: path.display().to_string(),
                        source,
                    })?
            }
            CatalogSource::Http(url) => {
                let http_err = |source: reqwest::Error| CatalogError::Http {
                    url: url.to_string(),
                    source,
                };
                let response = self
                    .client
                    .get(url.clone())
                    .send()
                    .await
                    .and_then(|r| r.error_for_status())
                    .map_err(http_err)?;
                response.bytes().await.map_err(http_err)?.to_vec()
            }
        };
        parse_catalog(&bytes)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use kirana_core::{CatalogStatus, Money, ProductId, Reducer, Store};
    use std::path::PathBuf;
    use tempfile::TempDir;

    const CATALOG: &str = r#"[
        {"id": 1, "name": "Tea", "price": 10, "image": "img/tea.png", "stock": 5},
        {"id": 2, "name": "Salt", "price": 2.5, "image": "img/salt.png", "stock": 0}
    ]"#;

    /// Writes `contents` to `products.json` in a fresh directory. The
    /// directory is removed when the returned guard drops.
    fn temp_catalog(contents: &str) -> (TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("products.json");
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    #[test]
    fn test_parse_catalog() {
        let products = parse_catalog(CATALOG.as_bytes()).unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].id, ProductId::new(1));
        assert_eq!(products[1].price, Money::from_major_minor(2, 50));
    }

    #[test]
    fn test_parse_catalog_rejects_non_array() {
        let err = parse_catalog(br#"{"products": []}"#).unwrap_err();
        assert!(matches!(err, CatalogError::Decode(_)));
    }

    #[tokio::test]
    async fn test_fetch_from_file() {
        let (_dir, path) = temp_catalog(CATALOG);
        let loader = CatalogLoader::new(CatalogSource::File(path.clone()));

        let snapshot = loader.fetch().await.unwrap();
        assert_eq!(snapshot.products.len(), 2);
        assert_eq!(snapshot.source, path.display().to_string());
    }

    #[tokio::test]
    async fn test_load_success_becomes_set_products() {
        let (_dir, path) = temp_catalog(CATALOG);
        let action = CatalogLoader::new(CatalogSource::File(path.clone()))
            .with_timeout(Some(Duration::from_secs(5)))
            .load()
            .await;

        let mut store = Store::new(Reducer::default());
        store.dispatch(action).unwrap();
        assert_eq!(store.state().products.len(), 2);
        assert_eq!(store.state().catalog, CatalogStatus::Loaded);
    }

    #[tokio::test]
    async fn test_missing_file_becomes_load_failed() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist.json");
        let action = CatalogLoader::new(CatalogSource::File(missing)).load().await;

        match &action {
            Action::LoadFailed { reason } => assert!(reason.contains("Failed to read catalog")),
            other => panic!("expected LoadFailed, got {:?}", other),
        }

        let mut store = Store::new(Reducer::default());
        store.dispatch(action).unwrap();
        assert!(store.state().products.is_empty());
        assert!(matches!(store.state().catalog, CatalogStatus::Failed { .. }));
    }

    #[tokio::test]
    async fn test_malformed_file_becomes_load_failed() {
        let (_dir, path) = temp_catalog("[{\"id\": 1,");
        let action = CatalogLoader::new(CatalogSource::File(path.clone())).load().await;
        match action {
            Action::LoadFailed { reason } => assert!(reason.starts_with("Invalid catalog data")),
            other => panic!("expected LoadFailed, got {:?}", other),
        }
    }
}
