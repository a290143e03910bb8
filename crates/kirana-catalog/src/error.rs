//! # Catalog Error Types
//!
//! ```text
//! reqwest::Error / io::Error / serde_json::Error
//!        │
//!        ▼
//! CatalogError (this module) ← adds the source it came from
//!        │
//!        ▼
//! Action::LoadFailed { reason } and ApiError (in app)
//! ```

use std::time::Duration;
use thiserror::Error;

/// Result type alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog load failures.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The configured source string is neither a path nor an http(s) URL.
    #[error("Invalid catalog source: {0}")]
    InvalidSource(String),

    /// Reading a local catalog file failed.
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The HTTP request failed or returned a non-success status.
    #[error("Failed to fetch catalog {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The body was not a JSON array of products.
    #[error("Invalid catalog data: {0}")]
    Decode(#[from] serde_json::Error),

    /// The load did not finish within the configured timeout.
    #[error("Catalog load timed out after {0:?}")]
    Timeout(Duration),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CatalogError::Timeout(Duration::from_secs(5));
        assert_eq!(err.to_string(), "Catalog load timed out after 5s");

        let err = CatalogError::InvalidSource("ftp://x".to_string());
        assert_eq!(err.to_string(), "Invalid catalog source: ftp://x");
    }
}
