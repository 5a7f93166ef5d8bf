//! Code 39 width-string decoder
//!
//! Each character is nine elements (five bars, four spaces) of which three
//! are wide; characters are separated by a narrow inter-character gap and
//! the symbol is framed by `*` start/stop characters. Quantized widths of
//! 2 or more count as wide.

use super::reverse;

/// (character, widths) with 1 = narrow, 2 = wide.
const CHARACTERS: [(char, [u8; 9]); 44] = [
    ('0', [1, 1, 1, 2, 2, 1, 2, 1, 1]),
    ('1', [2, 1, 1, 2, 1, 1, 1, 1, 2]),
    ('2', [1, 1, 2, 2, 1, 1, 1, 1, 2]),
    ('3', [2, 1, 2, 2, 1, 1, 1, 1, 1]),
    ('4', [1, 1, 1, 2, 2, 1, 1, 1, 2]),
    ('5', [2, 1, 1, 2, 2, 1, 1, 1, 1]),
    ('6', [1, 1, 2, 2, 2, 1, 1, 1, 1]),
    ('7', [1, 1, 1, 2, 1, 1, 2, 1, 2]),
    ('8', [2, 1, 1, 2, 1, 1, 2, 1, 1]),
    ('9', [1, 1, 2, 2, 1, 1, 2, 1, 1]),
    ('A', [2, 1, 1, 1, 1, 2, 1, 1, 2]),
    ('B', [1, 1, 2, 1, 1, 2, 1, 1, 2]),
    ('C', [2, 1, 2, 1, 1, 2, 1, 1, 1]),
    ('D', [1, 1, 1, 1, 2, 2, 1, 1, 2]),
    ('E', [2, 1, 1, 1, 2, 2, 1, 1, 1]),
    ('F', [1, 1, 2, 1, 2, 2, 1, 1, 1]),
    ('G', [1, 1, 1, 1, 1, 2, 2, 1, 2]),
    ('H', [2, 1, 1, 1, 1, 2, 2, 1, 1]),
    ('I', [1, 1, 2, 1, 1, 2, 2, 1, 1]),
    ('J', [1, 1, 1, 1, 2, 2, 2, 1, 1]),
    ('K', [2, 1, 1, 1, 1, 1, 1, 2, 2]),
    ('L', [1, 1, 2, 1, 1, 1, 1, 2, 2]),
    ('M', [2, 1, 2, 1, 1, 1, 1, 2, 1]),
    ('N', [1, 1, 1, 1, 2, 1, 1, 2, 2]),
    ('O', [2, 1, 1, 1, 2, 1, 1, 2, 1]),
    ('P', [1, 1, 2, 1, 2, 1, 1, 2, 1]),
    ('Q', [1, 1, 1, 1, 1, 1, 2, 2, 2]),
    ('R', [2, 1, 1, 1, 1, 1, 2, 2, 1]),
    ('S', [1, 1, 2, 1, 1, 1, 2, 2, 1]),
    ('T', [1, 1, 1, 1, 2, 1, 2, 2, 1]),
    ('U', [2, 2, 1, 1, 1, 1, 1, 1, 2]),
    ('V', [1, 2, 2, 1, 1, 1, 1, 1, 2]),
    ('W', [2, 2, 2, 1, 1, 1, 1, 1, 1]),
    ('X', [1, 2, 1, 1, 2, 1, 1, 1, 2]),
    ('Y', [2, 2, 1, 1, 2, 1, 1, 1, 1]),
    ('Z', [1, 2, 2, 1, 2, 1, 1, 1, 1]),
    ('-', [1, 2, 1, 1, 1, 1, 2, 1, 2]),
    ('.', [2, 2, 1, 1, 1, 1, 2, 1, 1]),
    (' ', [1, 2, 2, 1, 1, 1, 2, 1, 1]),
    ('*', [1, 2, 1, 1, 2, 1, 2, 1, 1]),
    ('$', [1, 2, 1, 2, 1, 2, 1, 1, 1]),
    ('/', [1, 2, 1, 2, 1, 1, 1, 2, 1]),
    ('+', [1, 2, 1, 1, 1, 2, 1, 2, 1]),
    ('%', [1, 1, 1, 2, 1, 2, 1, 2, 1]),
];

fn match_character(widths: &[u8]) -> Option<char> {
    let normalized: Vec<u8> = widths.iter().map(|&w| if w >= 2 { 2 } else { 1 }).collect();
    CHARACTERS
        .iter()
        .find(|(_, pattern)| normalized == pattern)
        .map(|(c, _)| *c)
}

fn decode_oriented(bar: &str) -> Option<String> {
    // n characters and n-1 narrow gaps
    let len = bar.len();
    if len < 19 || (len + 1) % 10 != 0 || !bar.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let count = (len + 1) / 10;

    let widths: Vec<u8> = bar.bytes().map(|b| b - b'0').collect();
    let mut chars = Vec::with_capacity(count);
    for i in 0..count {
        let start = i * 10;
        chars.push(match_character(&widths[start..start + 9])?);
        // Inter-character gap must stay narrow
        if i + 1 < count && widths[start + 9] >= 2 {
            return None;
        }
    }

    if chars.len() < 3 || chars[0] != '*' || chars[chars.len() - 1] != '*' {
        return None;
    }
    // Embedded stop characters mean a garbled scan
    let payload: String = chars[1..chars.len() - 1].iter().collect();
    if payload.contains('*') {
        return None;
    }
    Some(payload)
}

/// Decode a Code 39 symbol from a width string, either orientation.
pub fn decode_code39(bar: &str) -> Option<String> {
    decode_oriented(bar).or_else(|| decode_oriented(&reverse(bar)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(text: &str) -> Option<String> {
        let mut widths = Vec::new();
        let symbols: Vec<char> = format!("*{text}*").chars().collect();
        for (i, c) in symbols.iter().enumerate() {
            let (_, pattern) = CHARACTERS.iter().find(|(ch, _)| ch == c)?;
            widths.extend_from_slice(pattern);
            if i + 1 < symbols.len() {
                widths.push(1);
            }
        }
        Some(widths.iter().map(|&w| char::from(b'0' + w)).collect())
    }

    #[test]
    fn test_roundtrip() {
        let bar = encode("CODE-39").unwrap();
        assert_eq!(decode_code39(&bar).unwrap(), "CODE-39");
    }

    #[test]
    fn test_reversed_scan() {
        let bar = encode("AB12").unwrap();
        let reversed: String = bar.chars().rev().collect();
        assert_eq!(decode_code39(&reversed).unwrap(), "AB12");
    }

    #[test]
    fn test_missing_stop_rejected() {
        let mut bar = encode("X").unwrap();
        bar.truncate(bar.len() - 10);
        assert!(decode_code39(&bar).is_none());
    }

    #[test]
    fn test_every_pattern_has_three_wide() {
        for (c, pattern) in CHARACTERS {
            let wide = pattern.iter().filter(|&&w| w == 2).count();
            assert_eq!(wide, 3, "character {c:?}");
        }
    }
}
