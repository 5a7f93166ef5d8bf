//! The decode engine capability interface

use crate::error::EngineResult;
use crate::hints::DecodeHints;
use barscan_core::{RasterSurface, Symbology};

/// One successful read from an engine.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineRead {
    /// The decoded text
    pub text: String,
    /// The symbology the engine recognized, when it reports one
    pub symbology: Option<Symbology>,
}

/// A barcode recognition engine.
///
/// Implementations wrap one recognition library each. A `decode` call is a
/// single attempt on a single surface: engines do not retry internally with
/// different preprocessing - variant generation belongs to the cascade.
///
/// Engines holding non-reentrant library state must not be invoked
/// concurrently on the same instance; the cascade guarantees one attempt at
/// a time per request.
pub trait DecodeEngine: Send + Sync {
    /// Stable engine identifier used in attempt records.
    fn name(&self) -> &'static str;

    /// Attempt to decode a barcode from `surface` under `hints`.
    fn decode(&self, surface: &RasterSurface, hints: &DecodeHints) -> EngineResult<EngineRead>;
}
