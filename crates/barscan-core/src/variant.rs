//! Image variants and their transform provenance
//!
//! The cascade derives many surfaces from one normalized input: rotations,
//! crops, stripes, pre-binarized copies. Each derived surface carries a
//! [`VariantProvenance`] describing exactly which transforms produced it, so
//! a successful decode (and every failed attempt) can be traced back to the
//! variant that was tried.

use crate::raster::RasterSurface;
use crate::symbology::{NARROW_SYMBOLOGIES, Symbology, WIDE_SYMBOLOGIES};

/// Binarization policy.
///
/// Selects between a local adaptive threshold and a global histogram
/// threshold (Otsu). The same policy value drives both the engine-side
/// binarizer choice and the normalizer's pre-binarization transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BinarizeMethod {
    /// Local adaptive thresholding (windowed mean)
    #[default]
    AdaptiveLocal,
    /// Global histogram thresholding (Otsu)
    GlobalHistogram,
}

impl BinarizeMethod {
    /// Returns the display name of this policy.
    pub fn name(&self) -> &'static str {
        match self {
            BinarizeMethod::AdaptiveLocal => "adaptive-local",
            BinarizeMethod::GlobalHistogram => "global-histogram",
        }
    }
}

/// Hint profile identifying which symbologies an attempt considers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HintProfile {
    /// No restriction; the engine's full default format set
    #[default]
    Unconstrained,
    /// Common retail product codes only (EAN-13, UPC-A)
    Narrow,
    /// Every supported 1-D symbology
    Wide,
}

impl HintProfile {
    /// Returns the display name of this profile.
    pub fn name(&self) -> &'static str {
        match self {
            HintProfile::Unconstrained => "unconstrained",
            HintProfile::Narrow => "narrow",
            HintProfile::Wide => "wide",
        }
    }

    /// The symbology allow-list for this profile, or `None` when the
    /// attempt is unconstrained.
    pub fn symbologies(&self) -> Option<&'static [Symbology]> {
        match self {
            HintProfile::Unconstrained => None,
            HintProfile::Narrow => Some(NARROW_SYMBOLOGIES),
            HintProfile::Wide => Some(WIDE_SYMBOLOGIES),
        }
    }
}

/// The region of the source frame a variant was cut from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RegionCrop {
    /// The whole frame
    Full,
    /// A centered crop keeping `fraction` of both dimensions
    Center { fraction: f32 },
    /// A centered horizontal band keeping `height_fraction` of the height
    /// at full width; `index` orders the configured bands
    Stripe { height_fraction: f32, index: usize },
    /// The whole frame after Otsu pre-binarization
    PreBinarized,
}

/// Transform provenance of a derived surface.
///
/// Records how a variant was produced from the normalized input. A default
/// provenance means the unmodified surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariantProvenance {
    /// Rotation applied about the center, in degrees (positive = clockwise)
    pub rotation_deg: f32,
    /// Region cut from the (possibly rotated) frame
    pub region: RegionCrop,
    /// Pre-binarization applied to the surface, if any
    pub binarized: Option<BinarizeMethod>,
    /// Long-edge cap the surface was downscaled to, if any
    pub max_edge: Option<u32>,
}

impl Default for VariantProvenance {
    fn default() -> Self {
        Self {
            rotation_deg: 0.0,
            region: RegionCrop::Full,
            binarized: None,
            max_edge: None,
        }
    }
}

impl VariantProvenance {
    /// Provenance of the unmodified normalized surface.
    pub fn full() -> Self {
        Self::default()
    }

    /// Set the rotation angle in degrees.
    pub fn with_rotation(mut self, degrees: f32) -> Self {
        self.rotation_deg = degrees;
        self
    }

    /// Set the region crop.
    pub fn with_region(mut self, region: RegionCrop) -> Self {
        self.region = region;
        self
    }

    /// Set the pre-binarization method.
    pub fn with_binarized(mut self, method: BinarizeMethod) -> Self {
        self.binarized = Some(method);
        self
    }

    /// Set the long-edge cap.
    pub fn with_max_edge(mut self, max_edge: u32) -> Self {
        self.max_edge = Some(max_edge);
        self
    }
}

/// A derived raster surface plus its transform provenance.
///
/// Owned by exactly one decode request and never mutated after creation;
/// each further transform produces a new variant.
#[derive(Debug, Clone)]
pub struct ImageVariant {
    /// The derived surface
    pub surface: RasterSurface,
    /// How the surface was produced
    pub provenance: VariantProvenance,
}

impl ImageVariant {
    /// Create a variant from a surface and its provenance.
    pub fn new(surface: RasterSurface, provenance: VariantProvenance) -> Self {
        Self {
            surface,
            provenance,
        }
    }

    /// Wrap an unmodified normalized surface.
    pub fn source(surface: RasterSurface) -> Self {
        Self::new(surface, VariantProvenance::full())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_symbologies() {
        assert!(HintProfile::Unconstrained.symbologies().is_none());
        assert_eq!(
            HintProfile::Narrow.symbologies().unwrap(),
            NARROW_SYMBOLOGIES
        );
        assert_eq!(HintProfile::Wide.symbologies().unwrap(), WIDE_SYMBOLOGIES);
    }

    #[test]
    fn test_provenance_builder() {
        let p = VariantProvenance::full()
            .with_rotation(-14.0)
            .with_region(RegionCrop::Center { fraction: 0.88 })
            .with_binarized(BinarizeMethod::GlobalHistogram)
            .with_max_edge(1800);
        assert_eq!(p.rotation_deg, -14.0);
        assert_eq!(p.binarized, Some(BinarizeMethod::GlobalHistogram));
        assert_eq!(p.max_edge, Some(1800));
        assert!(matches!(p.region, RegionCrop::Center { .. }));
    }

    #[test]
    fn test_default_is_full() {
        let p = VariantProvenance::default();
        assert_eq!(p.rotation_deg, 0.0);
        assert_eq!(p.region, RegionCrop::Full);
        assert!(p.binarized.is_none());
        assert!(p.max_edge.is_none());
    }
}
