//! Where the catalog lives.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use url::Url;

use crate::error::CatalogError;

/// A catalog location.
///
/// Parsed from configuration text:
/// - `products.json`, `/srv/shop/products.json`, `file:///srv/products.json` → [`CatalogSource::File`]
/// - `http://...`, `https://...` → [`CatalogSource::Http`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    File(PathBuf),
    Http(Url),
}

impl CatalogSource {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        CatalogSource::File(path.into())
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, CatalogSource::Http(_))
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogSource::File(path) => write!(f, "{}", path.display()),
            CatalogSource::Http(url) => write!(f, "{}", url),
        }
    }
}

impl FromStr for CatalogSource {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(CatalogError::InvalidSource("empty".to_string()));
        }

        let invalid = |reason: String| CatalogError::InvalidSource(format!("{}: {}", s, reason));

        if s.starts_with("http://") || s.starts_with("https://") {
            return Url::parse(s)
                .map(CatalogSource::Http)
                .map_err(|e| invalid(e.to_string()));
        }

        if s.starts_with("file://") {
            let url = Url::parse(s).map_err(|e| invalid(e.to_string()))?;
            return url
                .to_file_path()
                .map(CatalogSource::File)
                .map_err(|_| invalid("not a local file URL".to_string()));
        }

        if s.contains("://") {
            return Err(invalid("unsupported scheme".to_string()));
        }

        Ok(CatalogSource::File(PathBuf::from(s)))
    }
}
