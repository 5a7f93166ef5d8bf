//! Detector-slot engine: rqrr grid detection
//!
//! Fills the cascade's detector slot with rqrr's matrix-code detector.
//! rqrr takes no format hints; the hint set is accepted for interface
//! uniformity and ignored beyond diagnostics.

use crate::engine::{DecodeEngine, EngineRead};
use crate::error::{EngineError, EngineResult};
use crate::hints::DecodeHints;
use barscan_core::{RasterSurface, Symbology};

/// Grid detector adapter.
#[derive(Debug, Default, Clone, Copy)]
pub struct RqrrEngine;

impl RqrrEngine {
    /// Create a new engine.
    pub fn new() -> Self {
        Self
    }
}

impl DecodeEngine for RqrrEngine {
    fn name(&self) -> &'static str {
        "rqrr"
    }

    fn decode(&self, surface: &RasterSurface, _hints: &DecodeHints) -> EngineResult<EngineRead> {
        let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
            surface.width() as usize,
            surface.height() as usize,
            |x, y| surface.get_pixel_unchecked(x as u32, y as u32),
        );

        for grid in prepared.detect_grids() {
            match grid.decode() {
                Ok((_meta, content)) => {
                    return Ok(EngineRead {
                        text: content,
                        symbology: Some(Symbology::QrCode),
                    });
                }
                Err(_) => continue,
            }
        }

        Err(EngineError::NotFound)
    }
}
