//! Rotation operations
//!
//! Orthogonal rotations (90/180/270 degrees) are exact pixel remaps.
//! Arbitrary angles use bilinear interpolation with inverse mapping about
//! the image center, and the output canvas expands to the rotated bounding
//! box so no corner of the source is clipped. Background fill is white,
//! which reads as quiet zone to every decode engine.
//!
//! Positive angles rotate clockwise.

use crate::error::TransformResult;
use barscan_core::RasterSurface;

/// Background fill for pixels outside the rotated source.
const FILL_WHITE: u8 = 255;

/// Angles closer than this to a multiple of 90 degrees are snapped to the
/// exact orthogonal remap.
const ORTH_SNAP_DEG: f32 = 0.001;

/// Rotate a surface by 90-degree increments.
///
/// # Arguments
/// * `src` - Input surface
/// * `quads` - Number of 90-degree clockwise rotations (taken mod 4)
pub fn rotate_orth(src: &RasterSurface, quads: u32) -> TransformResult<RasterSurface> {
    match quads % 4 {
        0 => Ok(src.clone()),
        1 => rotate_90(src, true),
        2 => rotate_180(src),
        3 => rotate_90(src, false),
        _ => unreachable!(),
    }
}

/// Rotate a surface 90 degrees.
///
/// # Arguments
/// * `src` - Input surface
/// * `clockwise` - If true, rotate clockwise; otherwise counterclockwise
pub fn rotate_90(src: &RasterSurface, clockwise: bool) -> TransformResult<RasterSurface> {
    let w = src.width();
    let h = src.height();

    // Output dimensions are swapped
    let mut dst = RasterSurface::new(h, w)?;

    for y in 0..h {
        for x in 0..w {
            let val = src.get_pixel_unchecked(x, y);
            let (nx, ny) = if clockwise {
                (h - 1 - y, x)
            } else {
                (y, w - 1 - x)
            };
            dst.set_pixel_unchecked(nx, ny, val);
        }
    }

    Ok(dst)
}

/// Rotate a surface 180 degrees.
pub fn rotate_180(src: &RasterSurface) -> TransformResult<RasterSurface> {
    let w = src.width();
    let h = src.height();

    let mut dst = RasterSurface::new(w, h)?;

    for y in 0..h {
        for x in 0..w {
            let val = src.get_pixel_unchecked(x, y);
            dst.set_pixel_unchecked(w - 1 - x, h - 1 - y, val);
        }
    }

    Ok(dst)
}

/// Rotate a surface by an arbitrary angle in degrees about its center.
///
/// Positive angles rotate clockwise. Multiples of 90 degrees are handled by
/// the exact orthogonal remaps; all other angles use bilinear interpolation
/// and expand the output canvas to contain the whole rotated source.
///
/// # Arguments
/// * `src` - Input surface
/// * `degrees` - Rotation angle in degrees
pub fn rotate_by_degrees(src: &RasterSurface, degrees: f32) -> TransformResult<RasterSurface> {
    // Normalize to [0, 360)
    let mut angle = degrees % 360.0;
    if angle < 0.0 {
        angle += 360.0;
    }

    if angle < ORTH_SNAP_DEG || (360.0 - angle) < ORTH_SNAP_DEG {
        return Ok(src.clone());
    }
    if (angle - 90.0).abs() < ORTH_SNAP_DEG {
        return rotate_90(src, true);
    }
    if (angle - 180.0).abs() < ORTH_SNAP_DEG {
        return rotate_180(src);
    }
    if (angle - 270.0).abs() < ORTH_SNAP_DEG {
        return rotate_90(src, false);
    }

    let radians = angle.to_radians();
    let cos_a = radians.cos();
    let sin_a = radians.sin();

    let w = src.width() as f32;
    let h = src.height() as f32;

    let (new_w, new_h) = rotated_bounds(w, h, cos_a, sin_a);
    let mut dst = RasterSurface::new(new_w, new_h)?;
    dst.fill(FILL_WHITE);

    let cx_src = w / 2.0;
    let cy_src = h / 2.0;
    let cx_dst = new_w as f32 / 2.0;
    let cy_dst = new_h as f32 / 2.0;

    rotate_bilinear(src, &mut dst, cos_a, sin_a, cx_src, cy_src, cx_dst, cy_dst);

    Ok(dst)
}

/// Bounding box dimensions of the rotated source.
fn rotated_bounds(w: f32, h: f32, cos_a: f32, sin_a: f32) -> (u32, u32) {
    let corners = [
        (-w / 2.0, -h / 2.0),
        (w / 2.0, -h / 2.0),
        (w / 2.0, h / 2.0),
        (-w / 2.0, h / 2.0),
    ];

    let mut min_x = f32::MAX;
    let mut max_x = f32::MIN;
    let mut min_y = f32::MAX;
    let mut max_y = f32::MIN;

    for (x, y) in corners {
        let rx = x * cos_a - y * sin_a;
        let ry = x * sin_a + y * cos_a;
        min_x = min_x.min(rx);
        max_x = max_x.max(rx);
        min_y = min_y.min(ry);
        max_y = max_y.max(ry);
    }

    (
        (max_x - min_x).ceil().max(1.0) as u32,
        (max_y - min_y).ceil().max(1.0) as u32,
    )
}

/// Bilinear interpolation rotation with inverse mapping.
#[allow(clippy::too_many_arguments)]
fn rotate_bilinear(
    src: &RasterSurface,
    dst: &mut RasterSurface,
    cos_a: f32,
    sin_a: f32,
    cx_src: f32,
    cy_src: f32,
    cx_dst: f32,
    cy_dst: f32,
) {
    let src_w = src.width() as i32;
    let src_h = src.height() as i32;
    let dst_w = dst.width();
    let dst_h = dst.height();

    for dy in 0..dst_h {
        let y_rel = dy as f32 - cy_dst;
        for dx in 0..dst_w {
            let x_rel = dx as f32 - cx_dst;

            // Inverse rotation (clockwise positive)
            let sx = x_rel * cos_a + y_rel * sin_a + cx_src;
            let sy = -x_rel * sin_a + y_rel * cos_a + cy_src;

            let x0 = sx.floor() as i32;
            let y0 = sy.floor() as i32;
            let x1 = x0 + 1;
            let y1 = y0 + 1;

            if x0 >= 0 && x1 < src_w && y0 >= 0 && y1 < src_h {
                let fx = sx - x0 as f32;
                let fy = sy - y0 as f32;

                let p00 = src.get_pixel_unchecked(x0 as u32, y0 as u32) as f32;
                let p10 = src.get_pixel_unchecked(x1 as u32, y0 as u32) as f32;
                let p01 = src.get_pixel_unchecked(x0 as u32, y1 as u32) as f32;
                let p11 = src.get_pixel_unchecked(x1 as u32, y1 as u32) as f32;

                let top = p00 * (1.0 - fx) + p10 * fx;
                let bottom = p01 * (1.0 - fx) + p11 * fx;
                let val = (top * (1.0 - fy) + bottom * fy).round();

                dst.set_pixel_unchecked(dx, dy, val.clamp(0.0, 255.0) as u8);
            } else if x0 >= -1 && x1 <= src_w && y0 >= -1 && y1 <= src_h {
                // Partially outside: clamp to the nearest valid pixel
                let clamp_x = |x: i32| x.clamp(0, src_w - 1) as u32;
                let clamp_y = |y: i32| y.clamp(0, src_h - 1) as u32;
                let val = src.get_pixel_unchecked(clamp_x(x0), clamp_y(y0));
                dst.set_pixel_unchecked(dx, dy, val);
            }
            // Pixels outside the source keep the white fill
        }
    }
}
