//! Barscan Core - Data model for the barcode capture pipeline
//!
//! This crate provides the transient, per-decode-attempt data structures
//! shared by the rest of the workspace:
//!
//! - [`RasterSurface`] - The decodable 8-bit luma raster
//! - [`ImageVariant`] / [`VariantProvenance`] - A derived surface plus the
//!   transforms that produced it
//! - [`StrategyAttempt`] / [`AttemptOutcome`] - One (engine, variant, hints)
//!   try and what came of it
//! - [`DecodeOutcome`] / [`DecodedBarcode`] - The terminal result of a
//!   decode request
//! - [`AttemptSink`] - Append-only diagnostics sink for attempts
//!
//! Nothing here is persistent: every value lives for the duration of one
//! decode request and is discarded afterwards.

pub mod attempt;
pub mod error;
pub mod raster;
pub mod sink;
pub mod symbology;
pub mod variant;

pub use attempt::{AttemptOutcome, DecodeOutcome, DecodedBarcode, FailureKind, StrategyAttempt};
pub use error::{Error, Result};
pub use raster::RasterSurface;
pub use sink::{AttemptSink, MemorySink, NullSink};
pub use symbology::{NARROW_SYMBOLOGIES, Symbology, WIDE_SYMBOLOGIES};
pub use variant::{BinarizeMethod, HintProfile, ImageVariant, RegionCrop, VariantProvenance};
