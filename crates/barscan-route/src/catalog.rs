//! The product catalog collaborator
//!
//! The pipeline consumes exactly one thing from the catalog: does a
//! product row exist for this barcode, and if so, what does it look like.
//! Everything else about persistence stays on the other side of this
//! trait.

use std::future::Future;
use thiserror::Error;

/// A product row as the catalog reports it.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub barcode: String,
    pub name: String,
    pub price: f64,
    pub unit: Option<String>,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub stock: i64,
}

/// Errors from the catalog collaborator
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The existence query failed (network, backend, ...)
    #[error("catalog lookup failed: {0}")]
    Lookup(String),
}

/// Existence query against the product catalog.
pub trait ProductCatalog: Send + Sync {
    /// Look up a product by barcode. `Ok(None)` means no such product.
    fn find_by_barcode(
        &self,
        barcode: &str,
    ) -> impl Future<Output = Result<Option<ProductRecord>, CatalogError>> + Send;
}
