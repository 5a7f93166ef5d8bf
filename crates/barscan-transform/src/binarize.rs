//! Binary thresholding
//!
//! Two policies, matching the two ways the decode engines binarize:
//!
//! - **Global histogram (Otsu)**: one threshold for the whole surface,
//!   chosen to maximize between-class variance over the 256-bin histogram.
//!   Works well on evenly lit captures.
//! - **Adaptive local**: per-pixel threshold from the mean of a surrounding
//!   window minus a constant, computed over an integral image. Survives the
//!   uneven lighting typical of handheld phone photos.

use crate::error::{TransformError, TransformResult};
use barscan_core::{BinarizeMethod, RasterSurface};

/// Options for adaptive thresholding
#[derive(Debug, Clone)]
pub struct AdaptiveOptions {
    /// Size of the local window (must be odd)
    pub window_size: u32,
    /// Constant subtracted from the window mean
    pub c: f32,
}

impl Default for AdaptiveOptions {
    fn default() -> Self {
        Self {
            window_size: 15,
            c: 2.0,
        }
    }
}

impl AdaptiveOptions {
    /// Validate options
    pub fn validate(&self) -> TransformResult<()> {
        if self.window_size < 3 || self.window_size % 2 == 0 {
            return Err(TransformError::InvalidParameter(format!(
                "window_size must be odd and >= 3: {}",
                self.window_size
            )));
        }
        Ok(())
    }
}

/// Binarize a surface with the given policy.
///
/// Output pixels are either 0 (black) or 255 (white).
pub fn binarize(src: &RasterSurface, method: BinarizeMethod) -> TransformResult<RasterSurface> {
    match method {
        BinarizeMethod::AdaptiveLocal => binarize_adaptive(src, &AdaptiveOptions::default()),
        BinarizeMethod::GlobalHistogram => binarize_otsu(src),
    }
}

/// Compute Otsu's threshold for a surface.
///
/// Returns the threshold maximizing between-class variance. Pixels strictly
/// above the threshold are classified white.
pub fn otsu_threshold(src: &RasterSurface) -> u8 {
    let mut hist = [0u32; 256];
    for &p in src.as_raw() {
        hist[p as usize] += 1;
    }

    let total = (src.width() as u64) * (src.height() as u64);
    let mut sum = 0u64;
    for (t, &count) in hist.iter().enumerate() {
        sum += t as u64 * count as u64;
    }

    let mut sum_b = 0u64;
    let mut w_b = 0u64;
    let mut best = 0.0f64;
    let mut threshold = 127u8;

    for (t, &count) in hist.iter().enumerate() {
        w_b += count as u64;
        if w_b == 0 {
            continue;
        }
        let w_f = total - w_b;
        if w_f == 0 {
            break;
        }
        sum_b += t as u64 * count as u64;
        let m_b = sum_b as f64 / w_b as f64;
        let m_f = (sum - sum_b) as f64 / w_f as f64;
        let between = w_b as f64 * w_f as f64 * (m_b - m_f) * (m_b - m_f);
        if between > best {
            best = between;
            threshold = t as u8;
        }
    }

    threshold
}

/// Binarize with a global Otsu threshold.
pub fn binarize_otsu(src: &RasterSurface) -> TransformResult<RasterSurface> {
    let threshold = otsu_threshold(src);
    let data = src
        .as_raw()
        .iter()
        .map(|&p| if p > threshold { 255 } else { 0 })
        .collect();
    Ok(RasterSurface::from_raw(src.width(), src.height(), data)?)
}

/// Binarize with a local adaptive threshold.
///
/// The threshold at each pixel is the mean of the surrounding window minus
/// `c`; the window is clamped at the surface borders.
pub fn binarize_adaptive(
    src: &RasterSurface,
    options: &AdaptiveOptions,
) -> TransformResult<RasterSurface> {
    options.validate()?;

    let w = src.width() as usize;
    let h = src.height() as usize;
    let half = (options.window_size / 2) as i64;

    // Integral image with a zero row/column of padding
    let mut integral = vec![0u64; (w + 1) * (h + 1)];
    for y in 0..h {
        let mut row_sum = 0u64;
        for x in 0..w {
            row_sum += src.get_pixel_unchecked(x as u32, y as u32) as u64;
            integral[(y + 1) * (w + 1) + (x + 1)] = integral[y * (w + 1) + (x + 1)] + row_sum;
        }
    }

    let mut dst = RasterSurface::new(src.width(), src.height())?;

    for y in 0..h as i64 {
        let y0 = (y - half).max(0) as usize;
        let y1 = ((y + half + 1).min(h as i64)) as usize;
        for x in 0..w as i64 {
            let x0 = (x - half).max(0) as usize;
            let x1 = ((x + half + 1).min(w as i64)) as usize;

            let area = ((y1 - y0) * (x1 - x0)) as u64;
            let sum = integral[y1 * (w + 1) + x1] + integral[y0 * (w + 1) + x0]
                - integral[y0 * (w + 1) + x1]
                - integral[y1 * (w + 1) + x0];
            let mean = sum as f32 / area as f32;

            let p = src.get_pixel_unchecked(x as u32, y as u32) as f32;
            let val = if p > mean - options.c { 255 } else { 0 };
            dst.set_pixel_unchecked(x as u32, y as u32, val);
        }
    }

    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Half black, half white surface.
    fn bimodal(w: u32, h: u32) -> RasterSurface {
        let mut s = RasterSurface::new(w, h).unwrap();
        for y in 0..h {
            for x in 0..w {
                let v = if x < w / 2 { 30 } else { 220 };
                s.set_pixel_unchecked(x, y, v);
            }
        }
        s
    }

    #[test]
    fn test_otsu_threshold_separates_modes() {
        let s = bimodal(40, 10);
        let t = otsu_threshold(&s);
        assert!((30..220).contains(&t), "threshold {t} outside modes");
    }

    #[test]
    fn test_binarize_otsu_output_is_binary() {
        let s = bimodal(40, 10);
        let b = binarize_otsu(&s).unwrap();
        assert!(b.as_raw().iter().all(|&p| p == 0 || p == 255));
        assert_eq!(b.get_pixel_unchecked(0, 0), 0);
        assert_eq!(b.get_pixel_unchecked(39, 0), 255);
    }

    #[test]
    fn test_adaptive_tracks_local_illumination() {
        // A dark bar on a gradient background: a global threshold loses one
        // end, the local mean keeps both
        let mut s = RasterSurface::new(60, 21).unwrap();
        for y in 0..21 {
            for x in 0..60 {
                let bg = 100 + x as i32; // left-to-right gradient
                let v = if y == 10 { bg - 80 } else { bg };
                s.set_pixel_unchecked(x, y, v.clamp(0, 255) as u8);
            }
        }
        let b = binarize_adaptive(&s, &AdaptiveOptions::default()).unwrap();
        // The bar stays black at both ends of the gradient
        assert_eq!(b.get_pixel_unchecked(5, 10), 0);
        assert_eq!(b.get_pixel_unchecked(55, 10), 0);
        // Background away from the bar stays white
        assert_eq!(b.get_pixel_unchecked(5, 2), 255);
        assert_eq!(b.get_pixel_unchecked(55, 18), 255);
    }

    #[test]
    fn test_adaptive_rejects_even_window() {
        let s = RasterSurface::new(10, 10).unwrap();
        let options = AdaptiveOptions {
            window_size: 8,
            c: 2.0,
        };
        assert!(binarize_adaptive(&s, &options).is_err());
    }

    #[test]
    fn test_binarize_dispatch() {
        let s = bimodal(20, 8);
        let a = binarize(&s, BinarizeMethod::AdaptiveLocal).unwrap();
        let g = binarize(&s, BinarizeMethod::GlobalHistogram).unwrap();
        assert!(a.as_raw().iter().all(|&p| p == 0 || p == 255));
        assert!(g.as_raw().iter().all(|&p| p == 0 || p == 255));
    }
}
