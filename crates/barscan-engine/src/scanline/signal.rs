//! Signal extraction and width quantization
//!
//! Reduces a raster to a 1-D luminance signal, finds where the signal
//! crosses a dark/light threshold, and quantizes the distances between
//! crossings into integer bar-width units (1-4). The threshold is tuned
//! around the initial value to maximize the number of crossings found.

use barscan_core::RasterSurface;

/// Fewest crossings a plausible barcode scan can produce.
const MIN_CROSSINGS: usize = 10;

/// Average pixel values across a centered band of rows.
pub(crate) fn average_band(surface: &RasterSurface, nscans: u32) -> Vec<f32> {
    let w = surface.width();
    let h = surface.height();

    let actual = nscans.clamp(1, h);
    let first = (h - actual) / 2;
    let last = first + actual;

    let mut signal = vec![0.0f32; w as usize];
    for y in first..last {
        for (x, value) in surface.row(y).iter().enumerate() {
            signal[x] += *value as f32;
        }
    }
    for value in signal.iter_mut() {
        *value /= actual as f32;
    }
    signal
}

/// A single row as a signal.
pub(crate) fn single_row(surface: &RasterSurface, y: u32) -> Vec<f32> {
    surface.row(y).iter().map(|&p| p as f32).collect()
}

/// Extract threshold-crossing locations from a signal.
///
/// Tunes the threshold in steps around `initial_threshold` and keeps the
/// one yielding the most crossings, ties broken toward the signal's
/// mid-range. Returns `None` when fewer than [`MIN_CROSSINGS`] crossings
/// exist at any tried threshold.
pub(crate) fn extract_crossings(signal: &[f32], initial_threshold: f32) -> Option<Vec<f32>> {
    let mid = mid_range(signal);
    let mut best_threshold = initial_threshold;
    let mut best_distance = f32::INFINITY;
    let mut max_crossings = 0;

    for delta in (-40..=40).step_by(4) {
        let threshold = initial_threshold + delta as f32;
        if !(20.0..=220.0).contains(&threshold) {
            continue;
        }
        let count = count_crossings(signal, threshold);
        // Crossing interpolation is only symmetric near the mid-range; an
        // off-center threshold measures bars and spaces unequally wide.
        let distance = (threshold - mid).abs();
        if count > max_crossings || (count == max_crossings && count > 0 && distance < best_distance)
        {
            max_crossings = count;
            best_threshold = threshold;
            best_distance = distance;
        }
    }

    if max_crossings < MIN_CROSSINGS {
        return None;
    }

    Some(find_crossings(signal, best_threshold))
}

fn mid_range(signal: &[f32]) -> f32 {
    let mut lo = f32::MAX;
    let mut hi = f32::MIN;
    for &v in signal {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    (lo + hi) / 2.0
}

fn count_crossings(signal: &[f32], threshold: f32) -> usize {
    if signal.len() < 2 {
        return 0;
    }
    let mut count = 0;
    let mut above = signal[0] > threshold;
    for &v in &signal[1..] {
        let now_above = v > threshold;
        if now_above != above {
            count += 1;
            above = now_above;
        }
    }
    count
}

/// Crossing points with sub-pixel interpolation.
fn find_crossings(signal: &[f32], threshold: f32) -> Vec<f32> {
    let mut crossings = Vec::new();
    if signal.len() < 2 {
        return crossings;
    }

    let mut above = signal[0] > threshold;
    for i in 1..signal.len() {
        let now_above = signal[i] > threshold;
        if now_above != above {
            let x0 = (i - 1) as f32;
            let y0 = signal[i - 1];
            let y1 = signal[i];
            let crossing = if (y1 - y0).abs() > 0.001 {
                x0 + (threshold - y0) / (y1 - y0)
            } else {
                x0 + 0.5
            };
            crossings.push(crossing);
            above = now_above;
        }
    }
    crossings
}

/// Quantize crossing distances into integer width units (1-4).
///
/// The unit width is the average of the narrow-element cluster around the
/// 10th-percentile element width; elements wider than 8 units or narrower
/// than one pixel mean the scan did not hit a barcode, and `None` is
/// returned.
pub(crate) fn quantize_widths(crossings: &[f32]) -> Option<Vec<u8>> {
    if crossings.len() < MIN_CROSSINGS {
        return None;
    }

    let mut distances: Vec<f32> = Vec::with_capacity(crossings.len() - 1);
    for i in 1..crossings.len() {
        distances.push(crossings[i] - crossings[i - 1]);
    }

    let mut sorted = distances.clone();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let min_idx = (sorted.len() as f32 * 0.1) as usize;
    let max_idx = ((sorted.len() as f32 * 0.9) as usize).min(sorted.len() - 1);
    let min_size = sorted[min_idx];
    let max_size = sorted[max_idx];

    if min_size < 1.0 || max_size / min_size > 8.0 {
        return None;
    }

    // The narrowest single element carries the largest relative
    // interpolation error; the cluster average does not.
    let mut unit_sum = 0.0f32;
    let mut unit_count = 0u32;
    for &d in &distances {
        if d <= min_size * 1.5 {
            unit_sum += d;
            unit_count += 1;
        }
    }
    let unit = unit_sum / unit_count as f32;

    let widths = distances
        .iter()
        .map(|&d| ((d / unit).round() as u8).clamp(1, 4))
        .collect();
    Some(widths)
}

/// Render quantized widths as a string of digits.
pub(crate) fn widths_to_bar_string(widths: &[u8]) -> String {
    widths.iter().map(|&w| char::from(b'0' + w)).collect()
}
