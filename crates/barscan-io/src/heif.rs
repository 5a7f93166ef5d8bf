//! HEIC/HEIF conversion via libheif
//!
//! Enabled with the `heif` feature. Decodes the primary image of a HEIF
//! container and re-encodes it for the bundled bitmap decoder.

use crate::convert::{FormatConverter, TargetFormat};
use crate::error::{IoError, IoResult};
use libheif_rs::{ColorSpace, HeifContext, LibHeif, RgbChroma};
use std::io::Cursor;

/// [`FormatConverter`] backed by libheif.
#[derive(Default)]
pub struct HeifConverter;

impl HeifConverter {
    /// Create a new converter.
    pub fn new() -> Self {
        Self
    }
}

impl FormatConverter for HeifConverter {
    fn name(&self) -> &'static str {
        "libheif"
    }

    fn convert(&self, data: &[u8], target: TargetFormat) -> IoResult<Vec<u8>> {
        let lib_heif = LibHeif::new();
        let ctx =
            HeifContext::read_from_bytes(data).map_err(|e| IoError::Convert(e.to_string()))?;
        let handle = ctx
            .primary_image_handle()
            .map_err(|e| IoError::Convert(e.to_string()))?;
        let decoded = lib_heif
            .decode(&handle, ColorSpace::Rgb(RgbChroma::Rgb), None)
            .map_err(|e| IoError::Convert(e.to_string()))?;

        let planes = decoded.planes();
        let interleaved = planes
            .interleaved
            .ok_or_else(|| IoError::Convert("no interleaved RGB plane".to_string()))?;

        let width = interleaved.width;
        let height = interleaved.height;
        let stride = interleaved.stride;

        let mut rgb = image::RgbImage::new(width, height);
        for y in 0..height {
            let row = &interleaved.data[y as usize * stride..];
            for x in 0..width {
                let i = x as usize * 3;
                rgb.put_pixel(x, y, image::Rgb([row[i], row[i + 1], row[i + 2]]));
            }
        }

        let format = match target {
            TargetFormat::Png => image::ImageFormat::Png,
            TargetFormat::Jpeg => image::ImageFormat::Jpeg,
        };
        let mut out = Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(rgb)
            .write_to(&mut out, format)
            .map_err(|e| IoError::Convert(e.to_string()))?;
        Ok(out.into_inner())
    }
}
