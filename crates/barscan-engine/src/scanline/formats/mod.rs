//! Width-string symbology decoders
//!
//! Each decoder takes a bar-width string (digits 1-4, alternating
//! bar/space starting with the first bar) and returns the decoded text if
//! the string is a valid symbol. Decoders handle reversed (upside-down)
//! scans by retrying on the reversed string.

mod code39;
mod ean;
mod itf;

pub use code39::decode_code39;
pub use ean::{decode_ean8, decode_ean13, decode_upca, ean13_checksum_ok};
pub use itf::decode_itf;

use crate::engine::EngineRead;
use barscan_core::Symbology;

/// Fixed dispatch order: most common retail symbologies first.
const DISPATCH_ORDER: &[Symbology] = &[
    Symbology::Ean13,
    Symbology::UpcA,
    Symbology::Ean8,
    Symbology::Itf,
    Symbology::Code39,
];

/// Try each allowed symbology against the width string.
pub(crate) fn dispatch(bar_string: &str, allowed: &[Symbology]) -> Option<EngineRead> {
    for &symbology in DISPATCH_ORDER {
        if !allowed.contains(&symbology) {
            continue;
        }
        let decoded = match symbology {
            Symbology::Ean13 => decode_ean13(bar_string),
            Symbology::UpcA => decode_upca(bar_string),
            Symbology::Ean8 => decode_ean8(bar_string),
            Symbology::Itf => decode_itf(bar_string),
            Symbology::Code39 => decode_code39(bar_string),
            _ => None,
        };
        if let Some(text) = decoded {
            return Some(EngineRead {
                text,
                symbology: Some(symbology),
            });
        }
    }
    None
}

/// Reverse a width string for upside-down scans.
pub(crate) fn reverse(bar_string: &str) -> String {
    bar_string.chars().rev().collect()
}
