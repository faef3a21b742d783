//! Static product catalog.
//!
//! The catalog is a JSON array in a single file. It is re-read on every call
//! and never written.

mod filter;

pub use filter::{
    CATALOG_MISSING, FilterCriteria, FilterOutcome, FilterRequest, FilterResponse, MAX_RESULTS,
    filter_products,
};

use std::io::ErrorKind;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;

/// One catalog record, kept exactly as stored. The filter reads `category`,
/// `color` and `price`; every other key (and explicit `null`s) passes through.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(transparent)]
pub struct Product(Map<String, Value>);

impl Product {
    #[must_use]
    pub fn category(&self) -> &str {
        self.text("category")
    }

    #[must_use]
    pub fn color(&self) -> &str {
        self.text("color")
    }

    /// Missing or non-numeric prices read as zero.
    #[must_use]
    pub fn price(&self) -> f64 {
        self.0.get("price").and_then(Value::as_f64).unwrap_or(0.0)
    }

    #[must_use]
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    fn text(&self, key: &str) -> &str {
        self.0.get(key).and_then(Value::as_str).unwrap_or_default()
    }
}

impl From<Map<String, Value>> for Product {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Handle on the catalog file.
#[derive(Debug, Clone)]
pub struct Catalog {
    path: PathBuf,
}

impl Catalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the whole catalog. `Ok(None)` means the file does not exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or is not a
    /// JSON array of products.
    pub async fn load(&self) -> Result<Option<Vec<Product>>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    /// Load the catalog and run one filter pass over it.
    ///
    /// # Errors
    /// See [`Catalog::load`]. A missing file is not an error.
    pub async fn filter(&self, criteria: &FilterCriteria) -> Result<FilterResponse> {
        let Some(products) = self.load().await? else {
            tracing::warn!(path = %self.path.display(), "catalog file not found");
            return Ok(FilterResponse::catalog_missing());
        };
        Ok(FilterResponse::Results(filter_products(&products, criteria)))
    }
}
