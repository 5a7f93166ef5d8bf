//! Interleaved 2 of 5 width-string decoder
//!
//! Digits are encoded in pairs: the five bars of a group carry one digit,
//! the five interleaved spaces the next. The start pattern is four narrow
//! elements, the stop pattern wide-narrow-narrow.

use super::reverse;

/// Width patterns for digits 0-9 (five elements, two wide).
const DIGIT_PATTERNS: [[u8; 5]; 10] = [
    [1, 1, 2, 2, 1], // 0
    [2, 1, 1, 1, 2], // 1
    [1, 2, 1, 1, 2], // 2
    [2, 2, 1, 1, 1], // 3
    [1, 1, 2, 1, 2], // 4
    [2, 1, 2, 1, 1], // 5
    [1, 2, 2, 1, 1], // 6
    [1, 1, 1, 2, 2], // 7
    [2, 1, 1, 2, 1], // 8
    [1, 2, 1, 2, 1], // 9
];

const START: [u8; 4] = [1, 1, 1, 1];
const STOP: [u8; 3] = [2, 1, 1];

fn match_digit(widths: &[u8]) -> Option<u8> {
    let normalized: Vec<u8> = widths.iter().map(|&w| if w >= 2 { 2 } else { 1 }).collect();
    DIGIT_PATTERNS
        .iter()
        .position(|p| normalized == p)
        .map(|d| d as u8)
}

fn decode_oriented(bar: &str) -> Option<String> {
    let widths: Vec<u8> = bar.bytes().map(|b| b.checked_sub(b'0')).collect::<Option<_>>()?;
    let len = widths.len();

    // start(4) + 10 per digit pair + stop(3)
    if len < 17 || (len - 7) % 10 != 0 {
        return None;
    }
    let normalized = |w: u8| if w >= 2 { 2 } else { 1 };
    if widths[..4].iter().map(|&w| normalized(w)).collect::<Vec<_>>() != START {
        return None;
    }
    if widths[len - 3..]
        .iter()
        .map(|&w| normalized(w))
        .collect::<Vec<_>>()
        != STOP
    {
        return None;
    }

    let pairs = (len - 7) / 10;
    let mut text = String::with_capacity(pairs * 2);
    for pair in 0..pairs {
        let group = &widths[4 + pair * 10..4 + pair * 10 + 10];
        let bars: Vec<u8> = group.iter().step_by(2).copied().collect();
        let spaces: Vec<u8> = group.iter().skip(1).step_by(2).copied().collect();
        let first = match_digit(&bars)?;
        let second = match_digit(&spaces)?;
        text.push(char::from(b'0' + first));
        text.push(char::from(b'0' + second));
    }
    Some(text)
}

/// Decode an ITF symbol from a width string, either orientation.
pub fn decode_itf(bar: &str) -> Option<String> {
    decode_oriented(bar).or_else(|| decode_oriented(&reverse(bar)))
}
