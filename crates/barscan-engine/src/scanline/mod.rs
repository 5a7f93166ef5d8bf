//! Tertiary engine: scanline signal decoding
//!
//! A self-contained 1-D decoder that works directly on the luma raster:
//! horizontal scans are averaged into a signal, threshold crossings are
//! extracted and quantized into bar-width units, and the resulting width
//! string is matched against per-symbology width tables. It reads nothing
//! the primary engine's image pipeline depends on, which is exactly what
//! makes it a useful last resort on photos the other engines give up on.

pub mod formats;
mod signal;

use crate::engine::{DecodeEngine, EngineRead};
use crate::error::{EngineError, EngineResult};
use crate::hints::DecodeHints;
use barscan_core::{RasterSurface, Symbology, WIDE_SYMBOLOGIES};
use tracing::trace;

/// Options for the scanline engine
#[derive(Debug, Clone)]
pub struct ScanlineOptions {
    /// Initial threshold for crossing detection (auto-tuned around this)
    pub crossing_threshold: f32,
    /// Number of adjacent rows averaged for the primary band scan
    pub band_scans: u32,
    /// Height fractions for the fallback single-row scans, in try order
    pub row_fractions: Vec<f32>,
}

impl Default for ScanlineOptions {
    fn default() -> Self {
        Self {
            crossing_threshold: 120.0,
            band_scans: 50,
            row_fractions: vec![0.5, 0.33, 0.66, 0.25, 0.75],
        }
    }
}

/// Scanline signal decoder.
#[derive(Debug, Default)]
pub struct ScanlineEngine {
    options: ScanlineOptions,
}

impl ScanlineEngine {
    /// Create an engine with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with specific options.
    pub fn with_options(options: ScanlineOptions) -> Self {
        Self { options }
    }

    fn try_signal(&self, signal: &[f32], allowed: &[Symbology]) -> Option<EngineRead> {
        let crossings = signal::extract_crossings(signal, self.options.crossing_threshold)?;
        let widths = signal::quantize_widths(&crossings)?;
        let bar_string = signal::widths_to_bar_string(&widths);
        trace!(elements = bar_string.len(), "scanline candidate");
        formats::dispatch(&bar_string, allowed)
    }
}

impl DecodeEngine for ScanlineEngine {
    fn name(&self) -> &'static str {
        "scanline"
    }

    fn decode(&self, surface: &RasterSurface, hints: &DecodeHints) -> EngineResult<EngineRead> {
        let allowed = hints.profile.symbologies().unwrap_or(WIDE_SYMBOLOGIES);

        // Centered band average first: robust against speckle
        let band = signal::average_band(surface, self.options.band_scans);
        if let Some(read) = self.try_signal(&band, allowed) {
            return Ok(read);
        }

        // Then individual rows, center outwards
        for &fraction in &self.options.row_fractions {
            let y = ((surface.height() as f32 * fraction) as u32).min(surface.height() - 1);
            let row = signal::single_row(surface, y);
            if let Some(read) = self.try_signal(&row, allowed) {
                return Ok(read);
            }
        }

        Err(EngineError::NotFound)
    }
}
