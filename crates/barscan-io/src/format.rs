//! Input codec detection
//!
//! Detects the codec of photo input by examining magic numbers in the
//! header. ISO-BMFF containers (HEIC/HEIF/AVIF) are recognized by their
//! `ftyp` brand, since those are the formats phone cameras produce that a
//! stock bitmap decoder typically cannot open.

use crate::error::{IoError, IoResult};

/// Magic numbers for codec detection
mod magic {
    /// PNG: 89 50 4E 47 0D 0A 1A 0A
    pub const PNG: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    /// JPEG: FF D8 FF
    pub const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF];

    /// BMP: "BM"
    pub const BMP: &[u8] = b"BM";

    /// GIF87a
    pub const GIF87A: &[u8] = b"GIF87a";

    /// GIF89a
    pub const GIF89A: &[u8] = b"GIF89a";

    /// TIFF little-endian: II 2A 00
    pub const TIFF_LE: &[u8] = &[0x49, 0x49, 0x2A, 0x00];

    /// TIFF big-endian: MM 00 2A
    pub const TIFF_BE: &[u8] = &[0x4D, 0x4D, 0x00, 0x2A];

    /// WebP: RIFF....WEBP
    pub const RIFF: &[u8] = b"RIFF";
    pub const WEBP: &[u8] = b"WEBP";

    /// ISO-BMFF box type at offset 4
    pub const FTYP: &[u8] = b"ftyp";

    /// ftyp brands produced by HEIC/HEIF capture
    pub const HEIF_BRANDS: &[&[u8]] = &[
        b"heic", b"heix", b"hevc", b"hevx", b"heim", b"heis", b"mif1", b"msf1",
    ];

    /// ftyp brands for AVIF
    pub const AVIF_BRANDS: &[&[u8]] = &[b"avif", b"avis"];
}

/// Detected source codec of photo input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Png,
    Jpeg,
    Gif,
    Bmp,
    Tiff,
    WebP,
    /// HEIC/HEIF container; needs external conversion
    Heic,
    /// AVIF container; needs external conversion
    Avif,
    /// No recognizable magic number
    Unknown,
}

impl SourceFormat {
    /// Display name of the codec.
    pub fn name(&self) -> &'static str {
        match self {
            SourceFormat::Png => "PNG",
            SourceFormat::Jpeg => "JPEG",
            SourceFormat::Gif => "GIF",
            SourceFormat::Bmp => "BMP",
            SourceFormat::Tiff => "TIFF",
            SourceFormat::WebP => "WebP",
            SourceFormat::Heic => "HEIC",
            SourceFormat::Avif => "AVIF",
            SourceFormat::Unknown => "unknown",
        }
    }

    /// Whether the bundled bitmap decoder handles this codec directly.
    pub fn is_native(&self) -> bool {
        matches!(
            self,
            SourceFormat::Png
                | SourceFormat::Jpeg
                | SourceFormat::Gif
                | SourceFormat::Bmp
                | SourceFormat::Tiff
                | SourceFormat::WebP
        )
    }

    /// The bitmap decoder's format id, for native codecs.
    pub(crate) fn image_format(&self) -> Option<image::ImageFormat> {
        match self {
            SourceFormat::Png => Some(image::ImageFormat::Png),
            SourceFormat::Jpeg => Some(image::ImageFormat::Jpeg),
            SourceFormat::Gif => Some(image::ImageFormat::Gif),
            SourceFormat::Bmp => Some(image::ImageFormat::Bmp),
            SourceFormat::Tiff => Some(image::ImageFormat::Tiff),
            SourceFormat::WebP => Some(image::ImageFormat::WebP),
            _ => None,
        }
    }
}

/// Detect the codec of photo input from its header bytes.
pub fn sniff_format(data: &[u8]) -> IoResult<SourceFormat> {
    if data.len() < 4 {
        return Err(IoError::InputTooShort(data.len()));
    }

    if data.len() >= 8 && data.starts_with(magic::PNG) {
        return Ok(SourceFormat::Png);
    }
    if data.starts_with(magic::JPEG) {
        return Ok(SourceFormat::Jpeg);
    }
    if data.len() >= 6 && (data.starts_with(magic::GIF87A) || data.starts_with(magic::GIF89A)) {
        return Ok(SourceFormat::Gif);
    }
    if data.starts_with(magic::TIFF_LE) || data.starts_with(magic::TIFF_BE) {
        return Ok(SourceFormat::Tiff);
    }
    if data.len() >= 12 && data.starts_with(magic::RIFF) && &data[8..12] == magic::WEBP {
        return Ok(SourceFormat::WebP);
    }
    if data.starts_with(magic::BMP) {
        return Ok(SourceFormat::Bmp);
    }

    // ISO-BMFF: size (4 bytes), then "ftyp", then the major brand
    if data.len() >= 12 && &data[4..8] == magic::FTYP {
        let brand = &data[8..12];
        if magic::HEIF_BRANDS.contains(&brand) {
            return Ok(SourceFormat::Heic);
        }
        if magic::AVIF_BRANDS.contains(&brand) {
            return Ok(SourceFormat::Avif);
        }
    }

    Ok(SourceFormat::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff_png() {
        let mut data = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        data.extend_from_slice(&[0; 8]);
        assert_eq!(sniff_format(&data).unwrap(), SourceFormat::Png);
    }

    #[test]
    fn test_sniff_jpeg() {
        let data = [0xFF, 0xD8, 0xFF, 0xE0, 0, 0, 0, 0];
        assert_eq!(sniff_format(&data).unwrap(), SourceFormat::Jpeg);
    }

    #[test]
    fn test_sniff_heic_brand() {
        let mut data = vec![0x00, 0x00, 0x00, 0x18];
        data.extend_from_slice(b"ftypheic");
        data.extend_from_slice(&[0; 8]);
        assert_eq!(sniff_format(&data).unwrap(), SourceFormat::Heic);
    }

    #[test]
    fn test_sniff_avif_brand() {
        let mut data = vec![0x00, 0x00, 0x00, 0x1C];
        data.extend_from_slice(b"ftypavif");
        data.extend_from_slice(&[0; 8]);
        assert_eq!(sniff_format(&data).unwrap(), SourceFormat::Avif);
    }

    #[test]
    fn test_sniff_unknown() {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];
        assert_eq!(sniff_format(&data).unwrap(), SourceFormat::Unknown);
    }

    #[test]
    fn test_sniff_too_short() {
        assert!(matches!(
            sniff_format(&[0xFF, 0xD8]),
            Err(IoError::InputTooShort(2))
        ));
    }

    #[test]
    fn test_native_classification() {
        assert!(SourceFormat::Jpeg.is_native());
        assert!(SourceFormat::Png.is_native());
        assert!(!SourceFormat::Heic.is_native());
        assert!(!SourceFormat::Unknown.is_native());
    }
}
