//! Barscan Engine - Barcode recognition engines
//!
//! Every recognition library is wrapped behind the [`DecodeEngine`]
//! capability trait so the cascade can try engines in a static priority
//! order without engine-specific control flow. Three adapters ship here:
//!
//! - [`RxingEngine`] - multi-format reader, the primary engine
//! - [`RqrrEngine`] - grid detector filling the cascade's detector slot
//! - [`ScanlineEngine`] - in-tree 1-D signal decoder, the tertiary fallback
//!
//! Engines are passed a [`DecodeHints`] value narrowing the symbologies to
//! consider and selecting the binarization policy; each engine maps the
//! hints onto whatever its library supports and ignores the rest.

mod engine;
mod error;
mod hints;
mod rqrr_engine;
mod rxing_engine;
pub mod scanline;

pub use engine::{DecodeEngine, EngineRead};
pub use error::{EngineError, EngineResult};
pub use hints::DecodeHints;
pub use rqrr_engine::RqrrEngine;
pub use rxing_engine::RxingEngine;
pub use scanline::{ScanlineEngine, ScanlineOptions};
