//! Centered region extraction
//!
//! Two crop shapes feed the cascade: a centered crop that trims busy photo
//! margins, and centered horizontal stripes. Barcodes on product photos are
//! predominantly 1-D and horizontally oriented, so a stripe spanning the
//! full width often isolates the bar pattern from surrounding clutter.

use crate::error::{TransformError, TransformResult};
use barscan_core::RasterSurface;

/// Crop a centered region keeping `fraction` of both dimensions.
///
/// # Arguments
/// * `src` - Input surface
/// * `fraction` - Kept fraction of width and height, in (0, 1]
pub fn crop_center(src: &RasterSurface, fraction: f32) -> TransformResult<RasterSurface> {
    if !(fraction > 0.0 && fraction <= 1.0) {
        return Err(TransformError::InvalidParameter(format!(
            "center crop fraction must be in (0, 1]: {fraction}"
        )));
    }

    let w = ((src.width() as f32 * fraction).round() as u32).max(1);
    let h = ((src.height() as f32 * fraction).round() as u32).max(1);
    let x0 = (src.width() - w) / 2;
    let y0 = (src.height() - h) / 2;

    copy_region(src, x0, y0, w, h)
}

/// Crop a centered horizontal stripe spanning the full width.
///
/// # Arguments
/// * `src` - Input surface
/// * `height_fraction` - Kept fraction of the height, in (0, 1]
pub fn crop_hstripe(src: &RasterSurface, height_fraction: f32) -> TransformResult<RasterSurface> {
    if !(height_fraction > 0.0 && height_fraction <= 1.0) {
        return Err(TransformError::InvalidParameter(format!(
            "stripe height fraction must be in (0, 1]: {height_fraction}"
        )));
    }

    let h = ((src.height() as f32 * height_fraction).round() as u32).max(1);
    let y0 = (src.height() - h) / 2;

    copy_region(src, 0, y0, src.width(), h)
}

fn copy_region(
    src: &RasterSurface,
    x0: u32,
    y0: u32,
    w: u32,
    h: u32,
) -> TransformResult<RasterSurface> {
    let mut dst = RasterSurface::new(w, h)?;
    for y in 0..h {
        for x in 0..w {
            dst.set_pixel_unchecked(x, y, src.get_pixel_unchecked(x0 + x, y0 + y));
        }
    }
    Ok(dst)
}
