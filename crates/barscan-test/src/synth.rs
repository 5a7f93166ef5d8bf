//! Synthetic barcode rendering
//!
//! Renders EAN-13 symbols straight into a luma raster from the standard
//! encoding tables, so decode tests run against known-good input without
//! any image assets. The tables mirror the scanline decoder's; the
//! renderer and decoder are developed against the same reference.

use barscan_core::RasterSurface;

/// Width patterns for digits 0-9 (L/R side; G is the reverse).
const DIGIT_PATTERNS: [&str; 10] = [
    "3211", "2221", "2122", "1411", "1132", "1231", "1114", "1312", "1213", "3112",
];

/// Left-half parity selecting the leading digit.
const PARITY_PATTERNS: [&str; 10] = [
    "LLLLLL", "LLGLGG", "LLGGLG", "LLGGGL", "LGLLGG", "LGGLLG", "LGGGLL", "LGLGLG", "LGLGGL",
    "LGGLGL",
];

/// Quiet zone width in modules on each side.
const QUIET_MODULES: u32 = 10;

/// Compute the EAN-13 check digit for a 12-digit payload.
pub fn ean13_check_digit(base12: &str) -> Option<char> {
    if base12.len() != 12 || !base12.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let sum: u32 = base12
        .bytes()
        .enumerate()
        .map(|(i, b)| {
            let d = (b - b'0') as u32;
            if i % 2 == 0 { d } else { 3 * d }
        })
        .sum();
    Some(char::from(b'0' + ((10 - sum % 10) % 10) as u8))
}

/// Append the check digit to a 12-digit payload.
pub fn ean13_complete(base12: &str) -> Option<String> {
    let check = ean13_check_digit(base12)?;
    let mut code = base12.to_string();
    code.push(check);
    Some(code)
}

/// The symbol as (width-in-modules, is-bar) elements, guards included.
fn elements(code13: &str) -> Option<Vec<(u8, bool)>> {
    if code13.len() != 13 || !code13.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let digits: Vec<usize> = code13.bytes().map(|b| (b - b'0') as usize).collect();
    if ean13_check_digit(&code13[..12])? != code13.chars().last()? {
        return None;
    }

    let mut out: Vec<(u8, bool)> = Vec::with_capacity(59);
    let push_pattern = |out: &mut Vec<(u8, bool)>, pattern: &str, first_is_bar: bool| {
        let mut is_bar = first_is_bar;
        for c in pattern.bytes() {
            out.push((c - b'0', is_bar));
            is_bar = !is_bar;
        }
    };

    // Start guard: bar space bar
    push_pattern(&mut out, "111", true);

    // Left half: six digits, parity per the leading digit, starting with
    // a space
    let parity = PARITY_PATTERNS[digits[0]];
    for (i, p) in parity.chars().enumerate() {
        let pattern = DIGIT_PATTERNS[digits[i + 1]];
        if p == 'L' {
            push_pattern(&mut out, pattern, false);
        } else {
            let mirrored: String = pattern.chars().rev().collect();
            push_pattern(&mut out, &mirrored, false);
        }
    }

    // Center guard: space bar space bar space
    push_pattern(&mut out, "11111", false);

    // Right half: six digits starting with a bar
    for &d in &digits[7..] {
        push_pattern(&mut out, DIGIT_PATTERNS[d], true);
    }

    // End guard
    push_pattern(&mut out, "111", true);

    Some(out)
}

/// Render a complete EAN-13 code as a raster with quiet zones.
///
/// # Arguments
/// * `code13` - 13 digits with a valid check digit
/// * `module_px` - Width of one module in pixels
/// * `height` - Raster height in pixels
pub fn render_ean13(code13: &str, module_px: u32, height: u32) -> Option<RasterSurface> {
    if module_px == 0 || height == 0 {
        return None;
    }
    let elements = elements(code13)?;

    let symbol_modules: u32 = elements.iter().map(|&(w, _)| w as u32).sum();
    let width = (symbol_modules + 2 * QUIET_MODULES) * module_px;

    let mut row = Vec::with_capacity(width as usize);
    row.resize((QUIET_MODULES * module_px) as usize, 255u8);
    for &(w, is_bar) in &elements {
        let value = if is_bar { 0 } else { 255 };
        row.extend(std::iter::repeat_n(value, (w as u32 * module_px) as usize));
    }
    row.resize(width as usize, 255u8);

    let mut data = Vec::with_capacity((width * height) as usize);
    for _ in 0..height {
        data.extend_from_slice(&row);
    }
    RasterSurface::from_raw(width, height, data).ok()
}

/// Compress the value range of a surface, simulating a washed-out capture.
pub fn reduce_contrast(surface: &RasterSurface, dark: u8, light: u8) -> RasterSurface {
    let range = light.saturating_sub(dark) as u32;
    let data: Vec<u8> = surface
        .as_raw()
        .iter()
        .map(|&p| dark + ((p as u32 * range) / 255) as u8)
        .collect();
    RasterSurface::from_raw(surface.width(), surface.height(), data)
        .expect("same dimensions as input")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_digit() {
        assert_eq!(ean13_check_digit("400638133393"), Some('1'));
        assert_eq!(ean13_complete("400638133393").unwrap(), "4006381333931");
        assert!(ean13_check_digit("123").is_none());
    }

    #[test]
    fn test_symbol_has_95_modules() {
        let elements = elements("4006381333931").unwrap();
        assert_eq!(elements.len(), 59);
        let modules: u32 = elements.iter().map(|&(w, _)| w as u32).sum();
        assert_eq!(modules, 95);
    }

    #[test]
    fn test_render_dimensions() {
        let surface = render_ean13("4006381333931", 3, 80).unwrap();
        assert_eq!(surface.width(), (95 + 20) * 3);
        assert_eq!(surface.height(), 80);
    }

    #[test]
    fn test_render_rejects_bad_checksum() {
        assert!(render_ean13("4006381333932", 3, 80).is_none());
    }

    #[test]
    fn test_reduce_contrast_range() {
        let surface = render_ean13("4006381333931", 2, 10).unwrap();
        let washed = reduce_contrast(&surface, 90, 160);
        let min = *washed.as_raw().iter().min().unwrap();
        let max = *washed.as_raw().iter().max().unwrap();
        assert_eq!(min, 90);
        assert_eq!(max, 160);
    }
}
