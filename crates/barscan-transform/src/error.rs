//! Error types for barscan-transform

use thiserror::Error;

/// Errors that can occur during surface transforms
#[derive(Debug, Error)]
pub enum TransformError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] barscan_core::Error),

    /// Invalid parameter provided
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type for transform operations
pub type TransformResult<T> = Result<T, TransformError>;
