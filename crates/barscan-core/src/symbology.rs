//! Barcode symbologies
//!
//! Identifies which barcode symbologies a decode attempt should consider.
//! The two allow-lists mirror how a retail capture is actually constrained:
//! the narrow list covers the overwhelmingly common product codes, the wide
//! list adds the remaining 1-D symbologies worth trying on a photo.

/// A barcode symbology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbology {
    /// EAN-13 (13-digit retail product code)
    Ean13,
    /// EAN-8 (short-form retail code)
    Ean8,
    /// UPC-A (12-digit retail code; EAN-13 with a leading zero)
    UpcA,
    /// Code 128
    Code128,
    /// Code 39
    Code39,
    /// Interleaved 2 of 5
    Itf,
    /// QR code (2-D matrix)
    QrCode,
}

impl Symbology {
    /// Returns the display name of this symbology.
    pub fn name(&self) -> &'static str {
        match self {
            Symbology::Ean13 => "EAN-13",
            Symbology::Ean8 => "EAN-8",
            Symbology::UpcA => "UPC-A",
            Symbology::Code128 => "Code128",
            Symbology::Code39 => "Code39",
            Symbology::Itf => "ITF",
            Symbology::QrCode => "QR",
        }
    }
}

/// Allow-list for the narrow hint profile: common retail product codes.
pub const NARROW_SYMBOLOGIES: &[Symbology] = &[Symbology::Ean13, Symbology::UpcA];

/// Allow-list for the wide hint profile: every supported 1-D symbology.
pub const WIDE_SYMBOLOGIES: &[Symbology] = &[
    Symbology::Ean13,
    Symbology::Ean8,
    Symbology::UpcA,
    Symbology::Code128,
    Symbology::Code39,
    Symbology::Itf,
];
