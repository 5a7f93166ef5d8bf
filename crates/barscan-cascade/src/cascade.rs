//! The decode strategy cascade

use crate::diagnostics::TracingSink;
use crate::error::CascadeResult;
use crate::options::CascadeOptions;
use barscan_core::{
    AttemptOutcome, AttemptSink, BinarizeMethod, DecodeOutcome, DecodedBarcode, FailureKind,
    ImageVariant, RasterSurface, RegionCrop, StrategyAttempt, VariantProvenance,
};
use barscan_engine::{DecodeEngine, DecodeHints, EngineError};
use barscan_transform::{
    binarize_otsu, crop_center, crop_hstripe, rotate_by_degrees, rotate_orth, scale_to_max_edge,
};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use tracing::debug;

/// Orchestrates the ordered decode search across engines and variants.
///
/// Holds one primary engine (used for the direct decode and the full
/// sweep), an optional detector-slot engine and an optional fallback
/// engine. Engines are invoked one attempt at a time, never concurrently,
/// so adapters over non-reentrant libraries are safe to share.
pub struct DecodeCascade {
    primary: Arc<dyn DecodeEngine>,
    detector: Option<Arc<dyn DecodeEngine>>,
    fallback: Option<Arc<dyn DecodeEngine>>,
    options: CascadeOptions,
    sink: Arc<dyn AttemptSink>,
}

impl DecodeCascade {
    /// Create a cascade with only a primary engine.
    pub fn new(primary: Arc<dyn DecodeEngine>) -> Self {
        Self {
            primary,
            detector: None,
            fallback: None,
            options: CascadeOptions::default(),
            sink: Arc::new(TracingSink),
        }
    }

    /// Create the full production stack: rxing primary, rqrr in the
    /// detector slot, the scanline decoder as fallback.
    pub fn standard() -> Self {
        Self::new(Arc::new(barscan_engine::RxingEngine::new()))
            .with_detector(Arc::new(barscan_engine::RqrrEngine::new()))
            .with_fallback(Arc::new(barscan_engine::ScanlineEngine::new()))
    }

    /// Set the detector-slot engine.
    pub fn with_detector(mut self, detector: Arc<dyn DecodeEngine>) -> Self {
        self.detector = Some(detector);
        self
    }

    /// Set the fallback engine.
    pub fn with_fallback(mut self, fallback: Arc<dyn DecodeEngine>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Set the cascade options.
    pub fn with_options(mut self, options: CascadeOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the diagnostics sink.
    pub fn with_sink(mut self, sink: Arc<dyn AttemptSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Run the full photo-path search.
    ///
    /// Returns the first successful read, or
    /// [`DecodeOutcome::Exhausted`] after every combination has been tried
    /// exactly once. The attempt order is fixed; see the crate docs.
    pub fn decode_photo(&self, surface: &RasterSurface) -> CascadeResult<DecodeOutcome> {
        self.options.validate()?;
        let mut seq = 0usize;

        // 1. Primary engine, unmodified surface, engine defaults
        if let Some(read) = self.attempt(
            &mut seq,
            &self.primary,
            surface,
            VariantProvenance::full(),
            &DecodeHints::unconstrained(),
        ) {
            return Ok(DecodeOutcome::Decoded(read));
        }

        // 2. Detector slot, raw then downscaled
        if let Some(detector) = &self.detector {
            if let Some(read) = self.attempt(
                &mut seq,
                detector,
                surface,
                VariantProvenance::full(),
                &DecodeHints::unconstrained(),
            ) {
                return Ok(DecodeOutcome::Decoded(read));
            }

            let scaled = scale_to_max_edge(surface, self.options.detector_max_edge)?;
            // A no-op downscale would repeat the triple above; skip it
            if scaled.width() != surface.width() || scaled.height() != surface.height() {
                let provenance =
                    VariantProvenance::full().with_max_edge(self.options.detector_max_edge);
                if let Some(read) = self.attempt(
                    &mut seq,
                    detector,
                    &scaled,
                    provenance,
                    &DecodeHints::unconstrained(),
                ) {
                    return Ok(DecodeOutcome::Decoded(read));
                }
            }
        }

        // 3. Primary engine over the full variant sweep
        let base = scale_to_max_edge(surface, self.options.sweep_max_edge)?;
        let base_cap = if base.width() != surface.width() || base.height() != surface.height() {
            Some(self.options.sweep_max_edge)
        } else {
            None
        };

        for &angle in &self.options.sweep_angles {
            let rotated = if angle == 0.0 {
                base.clone()
            } else {
                rotate_by_degrees(&base, angle)?
            };
            let variants = self.derive_variants(&rotated, angle, base_cap)?;

            for &binarizer in &self.options.binarizers {
                for &profile in &self.options.profiles {
                    let hints = DecodeHints::narrow()
                        .with_profile(profile)
                        .with_binarizer(binarizer);
                    for variant in &variants {
                        if let Some(read) = self.attempt(
                            &mut seq,
                            &self.primary,
                            &variant.surface,
                            variant.provenance,
                            &hints,
                        ) {
                            return Ok(DecodeOutcome::Decoded(read));
                        }
                    }
                }
            }
        }

        // 4. Fallback engine, frame plus cardinal rotations
        if let Some(fallback) = &self.fallback {
            let mut provenance = VariantProvenance::full();
            provenance.max_edge = base_cap;
            if let Some(read) =
                self.attempt(&mut seq, fallback, &base, provenance, &DecodeHints::wide())
            {
                return Ok(DecodeOutcome::Decoded(read));
            }
            for quads in 1..=3u32 {
                let rotated = rotate_orth(&base, quads)?;
                let provenance = VariantProvenance {
                    rotation_deg: 90.0 * quads as f32,
                    region: RegionCrop::Full,
                    binarized: None,
                    max_edge: base_cap,
                };
                if let Some(read) =
                    self.attempt(&mut seq, fallback, &rotated, provenance, &DecodeHints::wide())
                {
                    return Ok(DecodeOutcome::Decoded(read));
                }
            }
        }

        debug!(attempts = seq, "cascade exhausted");
        Ok(DecodeOutcome::Exhausted { attempts: seq })
    }

    /// The per-frame quick path for live capture: one primary-engine
    /// attempt with the wide profile and no extra effort.
    ///
    /// Runs many times per second, so the variant sweep stays out of it.
    pub fn decode_live_frame(&self, surface: &RasterSurface) -> Option<DecodedBarcode> {
        let hints = DecodeHints::wide()
            .with_try_harder(false)
            .with_assume_gs1(false);
        let mut seq = 0usize;
        self.attempt(
            &mut seq,
            &self.primary,
            surface,
            VariantProvenance::full(),
            &hints,
        )
    }

    /// Derived variants for one rotated sweep surface, in attempt order:
    /// full frame, centered crop, each horizontal stripe, then the
    /// Otsu-pre-binarized full frame.
    fn derive_variants(
        &self,
        rotated: &RasterSurface,
        angle: f32,
        base_cap: Option<u32>,
    ) -> CascadeResult<Vec<ImageVariant>> {
        let provenance = |region: RegionCrop| VariantProvenance {
            rotation_deg: angle,
            region,
            binarized: None,
            max_edge: base_cap,
        };

        let mut variants = Vec::with_capacity(3 + self.options.stripe_fractions.len());
        variants.push(ImageVariant::new(
            rotated.clone(),
            provenance(RegionCrop::Full),
        ));
        variants.push(ImageVariant::new(
            crop_center(rotated, self.options.center_crop_fraction)?,
            provenance(RegionCrop::Center {
                fraction: self.options.center_crop_fraction,
            }),
        ));
        for (index, &height_fraction) in self.options.stripe_fractions.iter().enumerate() {
            variants.push(ImageVariant::new(
                crop_hstripe(rotated, height_fraction)?,
                provenance(RegionCrop::Stripe {
                    height_fraction,
                    index,
                }),
            ));
        }
        variants.push(ImageVariant::new(
            binarize_otsu(rotated)?,
            provenance(RegionCrop::PreBinarized)
                .with_binarized(BinarizeMethod::GlobalHistogram),
        ));
        Ok(variants)
    }

    /// Run one attempt: invoke the engine with panics contained, mirror
    /// the record to the sink, and return the read on success.
    fn attempt(
        &self,
        seq: &mut usize,
        engine: &Arc<dyn DecodeEngine>,
        surface: &RasterSurface,
        provenance: VariantProvenance,
        hints: &DecodeHints,
    ) -> Option<DecodedBarcode> {
        let result = catch_unwind(AssertUnwindSafe(|| engine.decode(surface, hints)));

        let outcome = match &result {
            Ok(Ok(read)) => AttemptOutcome::Decoded {
                text: read.text.clone(),
                symbology: read.symbology,
            },
            Ok(Err(EngineError::NotFound)) => AttemptOutcome::Failed(FailureKind::NotFound),
            Ok(Err(EngineError::Internal(message))) => {
                AttemptOutcome::Failed(FailureKind::EngineError(message.clone()))
            }
            Err(_) => AttemptOutcome::Failed(FailureKind::EnginePanic),
        };

        let attempt_seq = *seq;
        *seq += 1;
        self.sink.record(&StrategyAttempt {
            seq: attempt_seq,
            engine: engine.name(),
            provenance,
            profile: hints.profile,
            binarizer: hints.binarizer,
            outcome,
        });

        match result {
            Ok(Ok(read)) => Some(DecodedBarcode {
                text: read.text,
                symbology: read.symbology,
                engine: engine.name(),
                provenance,
                attempt_seq,
            }),
            _ => None,
        }
    }
}
