//! Decode hints
//!
//! A hint set narrows what a single attempt looks for and how hard it
//! tries. Profiles trade recall for speed: the narrow profile covers the
//! retail codes a product capture almost always is, the wide profile is the
//! full 1-D sweep, and the unconstrained set is whatever the engine's
//! defaults are - the cheapest first try.

use barscan_core::{BinarizeMethod, HintProfile};

/// Hints for one decode attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecodeHints {
    /// Symbology allow-list profile
    pub profile: HintProfile,
    /// Spend extra effort (engine-dependent)
    pub try_harder: bool,
    /// Treat reads as GS1 product codes
    pub assume_gs1: bool,
    /// Binarization policy for engines that binarize internally
    pub binarizer: BinarizeMethod,
}

impl Default for DecodeHints {
    fn default() -> Self {
        Self::unconstrained()
    }
}

impl DecodeHints {
    /// Engine defaults, no effort flags: the cheap first attempt.
    pub fn unconstrained() -> Self {
        Self {
            profile: HintProfile::Unconstrained,
            try_harder: false,
            assume_gs1: false,
            binarizer: BinarizeMethod::AdaptiveLocal,
        }
    }

    /// Retail product codes only, full effort.
    pub fn narrow() -> Self {
        Self {
            profile: HintProfile::Narrow,
            try_harder: true,
            assume_gs1: true,
            binarizer: BinarizeMethod::AdaptiveLocal,
        }
    }

    /// Every supported 1-D symbology, full effort.
    pub fn wide() -> Self {
        Self {
            profile: HintProfile::Wide,
            try_harder: true,
            assume_gs1: true,
            binarizer: BinarizeMethod::AdaptiveLocal,
        }
    }

    /// Set the hint profile.
    pub fn with_profile(mut self, profile: HintProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Set the try-harder flag.
    pub fn with_try_harder(mut self, try_harder: bool) -> Self {
        self.try_harder = try_harder;
        self
    }

    /// Set the GS1 assumption.
    pub fn with_assume_gs1(mut self, assume_gs1: bool) -> Self {
        self.assume_gs1 = assume_gs1;
        self
    }

    /// Set the binarization policy.
    pub fn with_binarizer(mut self, binarizer: BinarizeMethod) -> Self {
        self.binarizer = binarizer;
        self
    }
}
