//! Input normalization
//!
//! Takes photo bytes in and hands a luma raster out, running the
//! conversion ladder for codecs the bitmap decoder cannot open natively:
//! configured external converter first, then a blind decode attempt, then
//! failure. Every step is logged so a failed capture can be reconstructed
//! from the trace.

use crate::convert::{FormatConverter, TargetFormat};
use crate::error::{IoError, IoResult};
use crate::format::{SourceFormat, sniff_format};
use barscan_core::RasterSurface;
use tracing::debug;

/// Converts arbitrary photo input into a decodable raster surface.
#[derive(Default)]
pub struct Normalizer {
    converter: Option<Box<dyn FormatConverter>>,
}

impl Normalizer {
    /// Create a normalizer with no external converter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an external format converter for non-native codecs.
    pub fn with_converter(mut self, converter: Box<dyn FormatConverter>) -> Self {
        self.converter = Some(converter);
        self
    }

    /// Normalize photo bytes into an 8-bit luma raster.
    ///
    /// # Errors
    /// [`IoError::FormatUnsupported`] when neither the bitmap decoder nor
    /// the conversion ladder can produce a raster; [`IoError::Decode`] when
    /// a recognized codec is corrupt.
    pub fn normalize(&self, data: &[u8]) -> IoResult<RasterSurface> {
        let format = sniff_format(data)?;
        debug!(
            format = format.name(),
            size = data.len(),
            "normalizing photo input"
        );

        if let Some(image_format) = format.image_format() {
            return match image::load_from_memory_with_format(data, image_format) {
                Ok(decoded) => Ok(to_luma(&decoded)),
                Err(e) => Err(IoError::Decode(e.to_string())),
            };
        }

        // Non-native codec: try the external converter first
        if let Some(converter) = &self.converter {
            debug!(converter = converter.name(), "converting non-native codec");
            match converter.convert(data, TargetFormat::Png) {
                Ok(converted) => match image::load_from_memory(&converted) {
                    Ok(decoded) => {
                        debug!(
                            converted_size = converted.len(),
                            "conversion succeeded"
                        );
                        return Ok(to_luma(&decoded));
                    }
                    Err(e) => {
                        debug!(error = %e, "converted bytes failed to decode");
                    }
                },
                Err(e) => {
                    debug!(error = %e, "external conversion failed");
                }
            }
        }

        // Last resort: let the bitmap decoder guess. Some builds decode more
        // codecs than the sniffer promises.
        match image::load_from_memory(data) {
            Ok(decoded) => {
                debug!("fallback bitmap decode succeeded");
                Ok(to_luma(&decoded))
            }
            Err(_) => Err(IoError::FormatUnsupported {
                format: format.name().to_string(),
            }),
        }
    }
}

/// Reduce a decoded image to 8-bit luma with BT.601 weights.
fn to_luma(decoded: &image::DynamicImage) -> RasterSurface {
    let rgb = decoded.to_rgb8();
    let (w, h) = (rgb.width(), rgb.height());
    let mut data = Vec::with_capacity(w as usize * h as usize);
    for p in rgb.pixels() {
        let [r, g, b] = p.0;
        let luma = (299 * r as u32 + 587 * g as u32 + 114 * b as u32 + 500) / 1000;
        data.push(luma as u8);
    }
    // Dimensions come from a successfully decoded image
    RasterSurface::from_raw(w, h, data).expect("decoded image has valid dimensions")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Encode a small gradient as PNG bytes.
    fn png_bytes(w: u32, h: u32) -> Vec<u8> {
        let img = image::RgbImage::from_fn(w, h, |x, y| {
            image::Rgb([(x * 20) as u8, (y * 20) as u8, 0])
        });
        let mut out = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut out, image::ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    struct StubConverter {
        output: Vec<u8>,
    }

    impl FormatConverter for StubConverter {
        fn name(&self) -> &'static str {
            "stub"
        }
        fn convert(&self, _data: &[u8], _target: TargetFormat) -> IoResult<Vec<u8>> {
            Ok(self.output.clone())
        }
    }

    fn heic_header() -> Vec<u8> {
        let mut data = vec![0x00, 0x00, 0x00, 0x18];
        data.extend_from_slice(b"ftypheic");
        data.extend_from_slice(&[0u8; 32]);
        data
    }

    #[test]
    fn test_normalize_png() {
        let normalizer = Normalizer::new();
        let surface = normalizer.normalize(&png_bytes(8, 6)).unwrap();
        assert_eq!(surface.width(), 8);
        assert_eq!(surface.height(), 6);
    }

    #[test]
    fn test_normalize_luma_weights() {
        // Pure green at BT.601 weight: 0.587 * 255 ~ 150
        let img = image::RgbImage::from_pixel(2, 2, image::Rgb([0, 255, 0]));
        let mut out = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut out, image::ImageFormat::Png)
            .unwrap();

        let surface = Normalizer::new().normalize(&out.into_inner()).unwrap();
        assert_eq!(surface.get_pixel_unchecked(0, 0), 150);
    }

    #[test]
    fn test_unconvertible_heic_is_unsupported() {
        let normalizer = Normalizer::new();
        let result = normalizer.normalize(&heic_header());
        assert!(matches!(
            result,
            Err(IoError::FormatUnsupported { format }) if format == "HEIC"
        ));
    }

    #[test]
    fn test_converter_path_used_for_heic() {
        let normalizer = Normalizer::new().with_converter(Box::new(StubConverter {
            output: png_bytes(4, 4),
        }));
        let surface = normalizer.normalize(&heic_header()).unwrap();
        assert_eq!(surface.width(), 4);
    }

    #[test]
    fn test_corrupt_png_reports_decode_error() {
        let mut data = png_bytes(8, 8);
        data.truncate(20);
        let result = Normalizer::new().normalize(&data);
        assert!(matches!(result, Err(IoError::Decode(_))));
    }

    #[test]
    fn test_empty_input() {
        let result = Normalizer::new().normalize(&[]);
        assert!(matches!(result, Err(IoError::InputTooShort(0))));
    }
}
