//! External format conversion
//!
//! Capability interface for the external codec collaborator. The pipeline
//! only ever asks for one thing: turn bytes it cannot decode into a
//! universally supported raster format.

use crate::error::IoResult;

/// Target format for a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetFormat {
    /// Lossless, maximum compatibility
    Png,
    /// Lossy, smaller
    Jpeg,
}

impl TargetFormat {
    /// Display name of the target.
    pub fn name(&self) -> &'static str {
        match self {
            TargetFormat::Png => "PNG",
            TargetFormat::Jpeg => "JPEG",
        }
    }
}

/// An external codec that can re-encode unsupported input.
///
/// Implementations decode the source bytes with whatever library they wrap
/// and re-encode into `target`. Failures are reported, never panicked.
pub trait FormatConverter: Send + Sync {
    /// Stable converter name, for diagnostics.
    fn name(&self) -> &'static str;

    /// Convert `data` into `target` format.
    fn convert(&self, data: &[u8], target: TargetFormat) -> IoResult<Vec<u8>>;
}
