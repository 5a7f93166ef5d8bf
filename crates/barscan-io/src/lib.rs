//! Barscan IO - Input normalization
//!
//! Converts arbitrary photo input (bytes in whatever codec a phone camera
//! produces) into a decodable [`RasterSurface`](barscan_core::RasterSurface):
//!
//! 1. Sniff the codec from magic numbers ([`sniff_format`])
//! 2. Decode web-standard codecs directly
//! 3. For codecs the environment cannot decode natively (HEIC/HEIF/AVIF),
//!    run the configured [`FormatConverter`], then fall back to whatever the
//!    bundled bitmap decoder can make of the bytes
//! 4. Reduce to an 8-bit luma raster
//!
//! When every step fails, normalization reports
//! [`IoError::FormatUnsupported`] and the decode pipeline never starts.

mod convert;
mod error;
mod format;
mod normalize;

#[cfg(feature = "heif")]
pub mod heif;

pub use convert::{FormatConverter, TargetFormat};
pub use error::{IoError, IoResult};
pub use format::{SourceFormat, sniff_format};
pub use normalize::Normalizer;
