//! Proportional downscaling
//!
//! Photos come out of phone cameras at resolutions far beyond what the
//! decode engines need; capping the long edge keeps the sweep affordable.
//! Downscaling uses box averaging over the source footprint of each output
//! pixel, which preserves bar/space contrast better than point sampling.
//! Upscaling is never performed.

use crate::error::{TransformError, TransformResult};
use barscan_core::RasterSurface;

/// Downscale a surface so its longer edge is at most `max_edge` pixels,
/// preserving the aspect ratio.
///
/// Returns a clone of the input when the surface already fits.
///
/// # Arguments
/// * `src` - Input surface
/// * `max_edge` - Cap for the longer edge (must be > 0)
pub fn scale_to_max_edge(src: &RasterSurface, max_edge: u32) -> TransformResult<RasterSurface> {
    if max_edge == 0 {
        return Err(TransformError::InvalidParameter(
            "max_edge must be positive".to_string(),
        ));
    }

    let long = src.long_edge();
    if long <= max_edge {
        return Ok(src.clone());
    }

    let ratio = max_edge as f64 / long as f64;
    let new_w = ((src.width() as f64 * ratio).round() as u32).max(1);
    let new_h = ((src.height() as f64 * ratio).round() as u32).max(1);

    let mut dst = RasterSurface::new(new_w, new_h)?;

    let x_step = src.width() as f64 / new_w as f64;
    let y_step = src.height() as f64 / new_h as f64;

    for dy in 0..new_h {
        let y0 = (dy as f64 * y_step) as u32;
        let y1 = (((dy + 1) as f64 * y_step).ceil() as u32).min(src.height());
        for dx in 0..new_w {
            let x0 = (dx as f64 * x_step) as u32;
            let x1 = (((dx + 1) as f64 * x_step).ceil() as u32).min(src.width());

            // Average the source footprint of this output pixel
            let mut sum = 0u32;
            let mut count = 0u32;
            for sy in y0..y1.max(y0 + 1) {
                for sx in x0..x1.max(x0 + 1) {
                    sum += src.get_pixel_unchecked(sx.min(src.width() - 1), sy.min(src.height() - 1))
                        as u32;
                    count += 1;
                }
            }
            dst.set_pixel_unchecked(dx, dy, (sum / count) as u8);
        }
    }

    Ok(dst)
}
