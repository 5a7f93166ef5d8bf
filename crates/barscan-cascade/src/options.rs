//! Cascade configuration
//!
//! Defaults reproduce the production sweep: small corrective angles first
//! (photos are usually almost straight), cardinal rotations last, the
//! hybrid binarizer before the global one, retail-format hints before the
//! wide set.

use crate::error::{CascadeError, CascadeResult};
use barscan_core::{BinarizeMethod, HintProfile};

/// Options for the decode strategy cascade.
#[derive(Debug, Clone)]
pub struct CascadeOptions {
    /// Sweep rotation angles in degrees, tried in order
    pub sweep_angles: Vec<f32>,
    /// Binarization policies, tried in order
    pub binarizers: Vec<BinarizeMethod>,
    /// Hint profiles, tried in order
    pub profiles: Vec<HintProfile>,
    /// Kept fraction for the centered crop variant
    pub center_crop_fraction: f32,
    /// Height fractions of the horizontal stripe variants
    pub stripe_fractions: Vec<f32>,
    /// Long-edge cap for the sweep base surface
    pub sweep_max_edge: u32,
    /// Long-edge cap for the detector's downscaled variant
    pub detector_max_edge: u32,
}

impl Default for CascadeOptions {
    fn default() -> Self {
        Self {
            sweep_angles: vec![
                0.0, 3.0, -3.0, 6.0, -6.0, 10.0, -10.0, 14.0, -14.0, 20.0, -20.0, 90.0, 180.0,
                270.0,
            ],
            binarizers: vec![
                BinarizeMethod::AdaptiveLocal,
                BinarizeMethod::GlobalHistogram,
            ],
            profiles: vec![HintProfile::Narrow, HintProfile::Wide],
            center_crop_fraction: 0.88,
            stripe_fractions: vec![0.25, 0.33, 0.40],
            sweep_max_edge: 1800,
            detector_max_edge: 1600,
        }
    }
}

impl CascadeOptions {
    /// Create options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sweep angles.
    pub fn with_sweep_angles(mut self, angles: Vec<f32>) -> Self {
        self.sweep_angles = angles;
        self
    }

    /// Set the binarization policies.
    pub fn with_binarizers(mut self, binarizers: Vec<BinarizeMethod>) -> Self {
        self.binarizers = binarizers;
        self
    }

    /// Set the hint profiles.
    pub fn with_profiles(mut self, profiles: Vec<HintProfile>) -> Self {
        self.profiles = profiles;
        self
    }

    /// Set the centered crop fraction.
    pub fn with_center_crop_fraction(mut self, fraction: f32) -> Self {
        self.center_crop_fraction = fraction;
        self
    }

    /// Set the stripe height fractions.
    pub fn with_stripe_fractions(mut self, fractions: Vec<f32>) -> Self {
        self.stripe_fractions = fractions;
        self
    }

    /// Set the sweep long-edge cap.
    pub fn with_sweep_max_edge(mut self, max_edge: u32) -> Self {
        self.sweep_max_edge = max_edge;
        self
    }

    /// Set the detector long-edge cap.
    pub fn with_detector_max_edge(mut self, max_edge: u32) -> Self {
        self.detector_max_edge = max_edge;
        self
    }

    /// Validate options.
    pub fn validate(&self) -> CascadeResult<()> {
        if self.sweep_angles.is_empty() {
            return Err(CascadeError::InvalidOptions(
                "sweep_angles must not be empty".to_string(),
            ));
        }
        if self.binarizers.is_empty() || self.profiles.is_empty() {
            return Err(CascadeError::InvalidOptions(
                "binarizers and profiles must not be empty".to_string(),
            ));
        }
        if !(self.center_crop_fraction > 0.0 && self.center_crop_fraction <= 1.0) {
            return Err(CascadeError::InvalidOptions(format!(
                "center_crop_fraction must be in (0, 1]: {}",
                self.center_crop_fraction
            )));
        }
        for &f in &self.stripe_fractions {
            if !(f > 0.0 && f <= 1.0) {
                return Err(CascadeError::InvalidOptions(format!(
                    "stripe fraction must be in (0, 1]: {f}"
                )));
            }
        }
        if self.sweep_max_edge == 0 || self.detector_max_edge == 0 {
            return Err(CascadeError::InvalidOptions(
                "edge caps must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Number of sweep attempts per rotation angle.
    pub(crate) fn attempts_per_angle(&self) -> usize {
        // full + center crop + stripes + pre-binarized, per binarizer/profile
        let regions = 3 + self.stripe_fractions.len();
        self.binarizers.len() * self.profiles.len() * regions
    }
}
