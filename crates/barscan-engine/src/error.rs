//! Error types for barscan-engine

use thiserror::Error;

/// Errors reported by a decode engine for a single attempt
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine ran to completion without finding a barcode
    #[error("no barcode found")]
    NotFound,

    /// The engine failed internally; the cascade treats this the same as
    /// a miss and moves on
    #[error("engine failure: {0}")]
    Internal(String),
}

/// Result type for engine operations
pub type EngineResult<T> = Result<T, EngineError>;
