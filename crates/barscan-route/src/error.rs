//! Error types for barscan-route

use crate::catalog::CatalogError;
use thiserror::Error;

/// Errors that can occur while routing a decoded barcode
#[derive(Debug, Error)]
pub enum RouteError {
    /// The barcode string was empty after trimming
    #[error("empty barcode")]
    EmptyBarcode,

    /// The catalog existence query failed
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// Result type for routing operations
pub type RouteResult<T> = Result<T, RouteError>;
