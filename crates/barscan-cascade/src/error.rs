//! Error types for barscan-cascade

use thiserror::Error;

/// Errors that can occur while running the cascade
#[derive(Debug, Error)]
pub enum CascadeError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] barscan_core::Error),

    /// Transform library error
    #[error("transform error: {0}")]
    Transform(#[from] barscan_transform::TransformError),

    /// Invalid cascade options
    #[error("invalid options: {0}")]
    InvalidOptions(String),
}

/// Result type for cascade operations
pub type CascadeResult<T> = Result<T, CascadeError>;
