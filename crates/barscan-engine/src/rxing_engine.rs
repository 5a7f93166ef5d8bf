//! Primary engine: rxing multi-format reader
//!
//! Wraps rxing's `MultiFormatReader`. The hint set maps directly onto
//! rxing's decoding hints; the binarization policy selects between the
//! hybrid (local) and global-histogram binarizers the library ships.

use crate::engine::{DecodeEngine, EngineRead};
use crate::error::{EngineError, EngineResult};
use crate::hints::DecodeHints;
use barscan_core::{BinarizeMethod, RasterSurface, Symbology};
use rxing::common::{GlobalHistogramBinarizer, HybridBinarizer};
use rxing::{
    BarcodeFormat, BinaryBitmap, DecodeHintType, DecodeHintValue, DecodingHintDictionary,
    Luma8LuminanceSource, MultiFormatReader, Reader,
};
use std::collections::HashSet;

/// Multi-format reader adapter.
#[derive(Debug, Default, Clone, Copy)]
pub struct RxingEngine;

impl RxingEngine {
    /// Create a new engine.
    pub fn new() -> Self {
        Self
    }
}

impl DecodeEngine for RxingEngine {
    fn name(&self) -> &'static str {
        "rxing"
    }

    fn decode(&self, surface: &RasterSurface, hints: &DecodeHints) -> EngineResult<EngineRead> {
        let dictionary = build_dictionary(hints);
        let source = Luma8LuminanceSource::new(
            surface.as_raw().to_vec(),
            surface.width(),
            surface.height(),
        );

        let result = match hints.binarizer {
            BinarizeMethod::AdaptiveLocal => {
                let mut bitmap = BinaryBitmap::new(HybridBinarizer::new(source));
                MultiFormatReader::default().decode_with_hints(&mut bitmap, &dictionary)
            }
            BinarizeMethod::GlobalHistogram => {
                let mut bitmap = BinaryBitmap::new(GlobalHistogramBinarizer::new(source));
                MultiFormatReader::default().decode_with_hints(&mut bitmap, &dictionary)
            }
        };

        match result {
            Ok(read) => Ok(EngineRead {
                text: read.getText().to_string(),
                symbology: map_format(read.getBarcodeFormat()),
            }),
            Err(rxing::Exceptions::NotFoundException(_)) => Err(EngineError::NotFound),
            Err(e) => Err(EngineError::Internal(e.to_string())),
        }
    }
}

fn build_dictionary(hints: &DecodeHints) -> DecodingHintDictionary {
    let mut dictionary = DecodingHintDictionary::new();
    if hints.try_harder {
        dictionary.insert(DecodeHintType::TRY_HARDER, DecodeHintValue::TryHarder(true));
    }
    if hints.assume_gs1 {
        dictionary.insert(DecodeHintType::ASSUME_GS1, DecodeHintValue::AssumeGs1(true));
    }
    if let Some(symbologies) = hints.profile.symbologies() {
        let formats: HashSet<BarcodeFormat> =
            symbologies.iter().map(|s| to_format(*s)).collect();
        dictionary.insert(
            DecodeHintType::POSSIBLE_FORMATS,
            DecodeHintValue::PossibleFormats(formats),
        );
    }
    dictionary
}

fn to_format(symbology: Symbology) -> BarcodeFormat {
    match symbology {
        Symbology::Ean13 => BarcodeFormat::EAN_13,
        Symbology::Ean8 => BarcodeFormat::EAN_8,
        Symbology::UpcA => BarcodeFormat::UPC_A,
        Symbology::Code128 => BarcodeFormat::CODE_128,
        Symbology::Code39 => BarcodeFormat::CODE_39,
        Symbology::Itf => BarcodeFormat::ITF,
        Symbology::QrCode => BarcodeFormat::QR_CODE,
    }
}

fn map_format(format: &BarcodeFormat) -> Option<Symbology> {
    match format {
        BarcodeFormat::EAN_13 => Some(Symbology::Ean13),
        BarcodeFormat::EAN_8 => Some(Symbology::Ean8),
        BarcodeFormat::UPC_A => Some(Symbology::UpcA),
        BarcodeFormat::CODE_128 => Some(Symbology::Code128),
        BarcodeFormat::CODE_39 => Some(Symbology::Code39),
        BarcodeFormat::ITF => Some(Symbology::Itf),
        BarcodeFormat::QR_CODE => Some(Symbology::QrCode),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_surface_is_not_found() {
        let surface = RasterSurface::new(64, 64).unwrap();
        let result = RxingEngine::new().decode(&surface, &DecodeHints::unconstrained());
        assert!(matches!(result, Err(EngineError::NotFound)));
    }

    #[test]
    fn test_format_mapping_roundtrip() {
        for s in [
            Symbology::Ean13,
            Symbology::Ean8,
            Symbology::UpcA,
            Symbology::Code128,
            Symbology::Code39,
            Symbology::Itf,
            Symbology::QrCode,
        ] {
            assert_eq!(map_format(&to_format(s)), Some(s));
        }
    }
}
