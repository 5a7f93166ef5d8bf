//! EAN-13 / UPC-A / EAN-8 width-string decoders
//!
//! Reference: <http://en.wikipedia.org/wiki/European_Article_Number>
//!
//! An EAN-13 symbol encodes 12 digits in bars; the 13th (leading) digit is
//! carried by the parity pattern of the left half: each left digit uses the
//! odd-parity (L) width pattern or its mirror (G), and the L/G sequence
//! selects the leading digit. UPC-A is EAN-13 with leading digit 0 (all-L
//! left half). The trailing digit of every symbol is a mod-10 check digit
//! and is enforced here - a misread that survives the width match is far
//! more likely to be caught by the checksum than by anything upstream.

use super::reverse;

/// Width patterns for digits 0-9.
///
/// Left odd-parity (L) digits start with a space, right (R) digits start
/// with a bar; both use the same four widths. The mirrored (G) pattern of a
/// digit is its L pattern reversed.
const DIGIT_PATTERNS: [&str; 10] = [
    "3211", // 0
    "2221", // 1
    "2122", // 2
    "1411", // 3
    "1132", // 4
    "1231", // 5
    "1114", // 6
    "1312", // 7
    "1213", // 8
    "3112", // 9
];

/// Left-half parity sequences selecting the EAN-13 leading digit.
const PARITY_PATTERNS: [&str; 10] = [
    "LLLLLL", // 0
    "LLGLGG", // 1
    "LLGGLG", // 2
    "LLGGGL", // 3
    "LGLLGG", // 4
    "LGGLLG", // 5
    "LGGGLL", // 6
    "LGLGLG", // 7
    "LGLGGL", // 8
    "LGGLGL", // 9
];

/// Start/stop guard widths (bar, space, bar).
const GUARD: &str = "111";

/// Center guard widths (space, bar, space, bar, space).
const CENTER: &str = "11111";

/// Element count of an EAN-13/UPC-A symbol: 3 + 6*4 + 5 + 6*4 + 3.
const EAN13_ELEMENTS: usize = 59;

/// Element count of an EAN-8 symbol: 3 + 4*4 + 5 + 4*4 + 3.
const EAN8_ELEMENTS: usize = 43;

/// Validate the mod-10 check digit of a complete EAN/UPC digit string.
///
/// Weights alternate 1, 3 from the leftmost digit (EAN-13) and 3, 1 for
/// the even-length EAN-8.
pub fn ean13_checksum_ok(digits: &[u8]) -> bool {
    let n = digits.len();
    if n < 2 {
        return false;
    }
    let sum: u32 = digits[..n - 1]
        .iter()
        .enumerate()
        .map(|(i, &d)| {
            // Rightmost payload digit always carries weight 3
            if (n - 1 - i) % 2 == 1 {
                3 * d as u32
            } else {
                d as u32
            }
        })
        .sum();
    (10 - sum % 10) % 10 == digits[n - 1] as u32
}

fn match_digit(code: &str) -> Option<(u8, char)> {
    for (digit, pattern) in DIGIT_PATTERNS.iter().enumerate() {
        if code == *pattern {
            return Some((digit as u8, 'L'));
        }
    }
    for (digit, pattern) in DIGIT_PATTERNS.iter().enumerate() {
        let mirrored: String = pattern.chars().rev().collect();
        if code == mirrored {
            return Some((digit as u8, 'G'));
        }
    }
    None
}

fn match_right_digit(code: &str) -> Option<u8> {
    DIGIT_PATTERNS
        .iter()
        .position(|&p| code == p)
        .map(|d| d as u8)
}

fn guards_ok(bar: &str, elements: usize, mid_start: usize) -> bool {
    bar.len() == elements
        && bar.starts_with(GUARD)
        && &bar[mid_start..mid_start + CENTER.len()] == CENTER
        && bar.ends_with(GUARD)
}

/// Parse an EAN-13 symbol in the given orientation.
fn parse_ean13(bar: &str) -> Option<[u8; 13]> {
    if !guards_ok(bar, EAN13_ELEMENTS, 27) {
        return None;
    }

    let mut parity = String::with_capacity(6);
    let mut digits = [0u8; 13];

    for i in 0..6 {
        let start = 3 + 4 * i;
        let (digit, p) = match_digit(&bar[start..start + 4])?;
        digits[i + 1] = digit;
        parity.push(p);
    }
    for i in 0..6 {
        let start = 32 + 4 * i;
        digits[i + 7] = match_right_digit(&bar[start..start + 4])?;
    }

    let leading = PARITY_PATTERNS.iter().position(|&p| p == parity)?;
    digits[0] = leading as u8;

    if !ean13_checksum_ok(&digits) {
        return None;
    }
    Some(digits)
}

/// Decode an EAN-13 symbol from a width string, either orientation.
pub fn decode_ean13(bar: &str) -> Option<String> {
    let digits = parse_ean13(bar).or_else(|| parse_ean13(&reverse(bar)))?;
    Some(digits.iter().map(|&d| char::from(b'0' + d)).collect())
}

/// Decode a UPC-A symbol: an all-L left half (leading digit 0), reported
/// as the 12 bar-encoded digits.
pub fn decode_upca(bar: &str) -> Option<String> {
    let digits = parse_ean13(bar).or_else(|| parse_ean13(&reverse(bar)))?;
    if digits[0] != 0 {
        return None;
    }
    Some(digits[1..].iter().map(|&d| char::from(b'0' + d)).collect())
}

fn parse_ean8(bar: &str) -> Option<[u8; 8]> {
    if !guards_ok(bar, EAN8_ELEMENTS, 19) {
        return None;
    }

    let mut digits = [0u8; 8];
    for i in 0..4 {
        let start = 3 + 4 * i;
        let (digit, parity) = match_digit(&bar[start..start + 4])?;
        // EAN-8 left digits are always odd parity
        if parity != 'L' {
            return None;
        }
        digits[i] = digit;
    }
    for i in 0..4 {
        let start = 24 + 4 * i;
        digits[i + 4] = match_right_digit(&bar[start..start + 4])?;
    }

    if !ean13_checksum_ok(&digits) {
        return None;
    }
    Some(digits)
}

/// Decode an EAN-8 symbol from a width string, either orientation.
pub fn decode_ean8(bar: &str) -> Option<String> {
    let digits = parse_ean8(bar).or_else(|| parse_ean8(&reverse(bar)))?;
    Some(digits.iter().map(|&d| char::from(b'0' + d)).collect())
}

/// Build the width string of an EAN-13 symbol. Test support for the
/// decoders in this module; rendering for decode tests lives in the test
/// crate's synthesizer, which mirrors these tables.
#[cfg(test)]
pub(crate) fn encode_ean13(digits: &str) -> Option<String> {
    if digits.len() != 13 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let d: Vec<u8> = digits.bytes().map(|b| b - b'0').collect();
    if !ean13_checksum_ok(&d) {
        return None;
    }

    let parity = PARITY_PATTERNS[d[0] as usize];
    let mut bar = String::from(GUARD);
    for (i, p) in parity.chars().enumerate() {
        let pattern = DIGIT_PATTERNS[d[i + 1] as usize];
        if p == 'L' {
            bar.push_str(pattern);
        } else {
            bar.extend(pattern.chars().rev());
        }
    }
    bar.push_str(CENTER);
    for &digit in &d[7..] {
        bar.push_str(DIGIT_PATTERNS[digit as usize]);
    }
    bar.push_str(GUARD);
    Some(bar)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum() {
        // 4006381333931 is a valid EAN-13
        let digits: Vec<u8> = "4006381333931".bytes().map(|b| b - b'0').collect();
        assert!(ean13_checksum_ok(&digits));
        let digits: Vec<u8> = "4006381333932".bytes().map(|b| b - b'0').collect();
        assert!(!ean13_checksum_ok(&digits));
    }

    #[test]
    fn test_ean13_roundtrip() {
        let code = "4006381333931";
        let bar = encode_ean13(code).unwrap();
        assert_eq!(bar.len(), EAN13_ELEMENTS);
        assert_eq!(decode_ean13(&bar).unwrap(), code);
    }

    #[test]
    fn test_ean13_reversed_scan() {
        let code = "4006381333931";
        let bar = encode_ean13(code).unwrap();
        let reversed = reverse(&bar);
        assert_eq!(decode_ean13(&reversed).unwrap(), code);
    }

    #[test]
    fn test_upca_is_leading_zero_ean13() {
        // 036000291452 is a valid UPC-A; as EAN-13 it is 0036000291452
        let bar = encode_ean13("0036000291452").unwrap();
        assert_eq!(decode_upca(&bar).unwrap(), "036000291452");
        // A non-zero leading digit is not UPC-A
        let bar13 = encode_ean13("4006381333931").unwrap();
        assert!(decode_upca(&bar13).is_none());
    }

    #[test]
    fn test_corrupt_checksum_rejected() {
        let mut bar = encode_ean13("4006381333931").unwrap();
        // Swap the last data digit's pattern for another valid one
        let tail = bar.len() - 7;
        bar.replace_range(tail..tail + 4, DIGIT_PATTERNS[0]);
        assert!(decode_ean13(&bar).is_none());
    }

    #[test]
    fn test_wrong_length_rejected() {
        assert!(decode_ean13("111").is_none());
        assert!(decode_ean8("111").is_none());
    }
}
