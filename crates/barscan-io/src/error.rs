//! Error types for barscan-io

use thiserror::Error;

/// Errors that can occur during input normalization
#[derive(Debug, Error)]
pub enum IoError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] barscan_core::Error),

    /// The input codec could not be decoded or converted by any available
    /// path; no decode is attempted
    #[error("unsupported image format: {format}")]
    FormatUnsupported { format: String },

    /// The bytes matched a known codec but failed to decode
    #[error("image decode failed: {0}")]
    Decode(String),

    /// The external format converter failed
    #[error("format conversion failed: {0}")]
    Convert(String),

    /// Input was empty or truncated below any plausible header
    #[error("input too short: {0} bytes")]
    InputTooShort(usize),
}

/// Result type for normalization operations
pub type IoResult<T> = Result<T, IoError>;
