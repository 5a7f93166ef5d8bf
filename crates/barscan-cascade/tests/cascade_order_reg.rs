//! Cascade ordering and exhaustion regression test
//!
//! Scripted engines make the search order exactly observable: with one
//! combination configured to succeed, the cascade must return that result
//! after precisely the attempts preceding it in the fixed priority order;
//! with everything failing, it must visit every combination exactly once.

use barscan_cascade::{CascadeOptions, DecodeCascade};
use barscan_core::{
    AttemptOutcome, BinarizeMethod, DecodeOutcome, FailureKind, HintProfile, MemorySink,
    RasterSurface, RegionCrop,
};
use barscan_test::{PanickingEngine, RegParams, ScriptedEngine};
use std::collections::HashSet;
use std::sync::Arc;

fn surface() -> RasterSurface {
    RasterSurface::new(200, 100).unwrap()
}

/// Default grid: 2 binarizers x 2 profiles x (full + crop + 3 stripes +
/// pre-binarized) = 24 attempts per angle, 14 angles.
const SWEEP_ATTEMPTS: usize = 14 * 24;

#[test]
fn exhaustion_reg() {
    let mut rp = RegParams::new("exhaustion");

    let primary = Arc::new(ScriptedEngine::always_fail("primary"));
    let detector = Arc::new(ScriptedEngine::always_fail("detector"));
    let fallback = Arc::new(ScriptedEngine::always_fail("fallback"));
    let sink = Arc::new(MemorySink::new());

    let cascade = DecodeCascade::new(primary.clone())
        .with_detector(detector.clone())
        .with_fallback(fallback.clone())
        .with_sink(sink.clone());

    let outcome = cascade.decode_photo(&surface()).unwrap();

    // 1 direct + 1 detector (downscale is a no-op at 200x100, so its
    // second attempt is skipped) + sweep + 4 fallback
    let expected = 1 + 1 + SWEEP_ATTEMPTS + 4;
    rp.check(
        matches!(outcome, DecodeOutcome::Exhausted { attempts } if attempts == expected),
        "exhausted after every combination",
    );
    rp.compare_values(expected as f64, sink.len() as f64, 0.0);
    rp.compare_values(
        (1 + SWEEP_ATTEMPTS) as f64,
        primary.call_count() as f64,
        0.0,
    );
    rp.compare_values(1.0, detector.call_count() as f64, 0.0);
    rp.compare_values(4.0, fallback.call_count() as f64, 0.0);

    // No (engine, variant, hints) triple is ever attempted twice
    let snapshot = sink.snapshot();
    let mut seen = HashSet::new();
    for attempt in &snapshot {
        let key = format!(
            "{}|{:?}|{:?}|{:?}",
            attempt.engine, attempt.provenance, attempt.profile, attempt.binarizer
        );
        rp.check(seen.insert(key), "duplicate attempt triple");
    }

    // Sequence numbers are the record order, gapless
    for (i, attempt) in snapshot.iter().enumerate() {
        if attempt.seq != i {
            rp.check(false, "attempt seq out of order");
            break;
        }
    }

    assert!(rp.cleanup(), "exhaustion regression test failed");
}

#[test]
fn ordering_reg() {
    let mut rp = RegParams::new("ordering");

    // Primary succeeds on its 6th call: the direct decode plus the first
    // five sweep attempts precede it
    let build = || {
        let primary = Arc::new(ScriptedEngine::succeed_on_call("primary", 5, "4006381333931"));
        let sink = Arc::new(MemorySink::new());
        let cascade = DecodeCascade::new(primary).with_sink(sink.clone());
        (cascade, sink)
    };

    let (cascade, sink) = build();
    let outcome = cascade.decode_photo(&surface()).unwrap();

    let decoded = match &outcome {
        DecodeOutcome::Decoded(d) => d,
        DecodeOutcome::Exhausted { .. } => {
            rp.check(false, "expected a decode");
            assert!(!rp.cleanup());
            return;
        }
    };
    rp.compare_text("4006381333931", &decoded.text);
    rp.compare_values(5.0, decoded.attempt_seq as f64, 0.0);

    // Exactly the preceding attempts are recorded, none after the win
    let snapshot = sink.snapshot();
    rp.compare_values(6.0, snapshot.len() as f64, 0.0);
    for attempt in &snapshot[..5] {
        rp.check(
            matches!(attempt.outcome, AttemptOutcome::Failed(FailureKind::NotFound)),
            "attempts before the win failed",
        );
    }
    rp.check(snapshot[5].outcome.is_decoded(), "winning attempt recorded");

    // The fixed prefix: direct decode, then sweep angle 0 / adaptive /
    // narrow over full, center crop and the first three stripes
    rp.check(
        snapshot[0].profile == HintProfile::Unconstrained
            && snapshot[0].provenance.region == RegionCrop::Full,
        "first attempt is the direct decode",
    );
    rp.check(
        snapshot[1].profile == HintProfile::Narrow
            && snapshot[1].binarizer == BinarizeMethod::AdaptiveLocal
            && snapshot[1].provenance.rotation_deg == 0.0
            && snapshot[1].provenance.region == RegionCrop::Full,
        "sweep starts at angle 0, adaptive, narrow, full frame",
    );
    rp.check(
        matches!(snapshot[2].provenance.region, RegionCrop::Center { .. }),
        "center crop follows the full frame",
    );
    rp.check(
        matches!(
            snapshot[3].provenance.region,
            RegionCrop::Stripe { index: 0, .. }
        ),
        "stripes follow the center crop",
    );

    // Repeating the identical request returns the identical text
    let (cascade2, _) = build();
    let outcome2 = cascade2.decode_photo(&surface()).unwrap();
    rp.compare_text(
        outcome.text().unwrap_or_default(),
        outcome2.text().unwrap_or_default(),
    );

    assert!(rp.cleanup(), "ordering regression test failed");
}

#[test]
fn direct_hit_reg() {
    let mut rp = RegParams::new("direct_hit");

    // A clean, axis-aligned capture decodes at step 1: exactly one record
    let primary = Arc::new(ScriptedEngine::succeed_on_call("primary", 0, "4006381333931"));
    let sink = Arc::new(MemorySink::new());
    let cascade = DecodeCascade::new(primary)
        .with_detector(Arc::new(ScriptedEngine::always_fail("detector")))
        .with_fallback(Arc::new(ScriptedEngine::always_fail("fallback")))
        .with_sink(sink.clone());

    let outcome = cascade.decode_photo(&surface()).unwrap();
    rp.check(outcome.is_decoded(), "decoded at step 1");
    rp.compare_values(1.0, sink.len() as f64, 0.0);

    assert!(rp.cleanup(), "direct hit regression test failed");
}

#[test]
fn sweep_variant_hit_reg() {
    let mut rp = RegParams::new("sweep_variant_hit");

    // A skewed, low-contrast capture that only reads at the +/-14 degree
    // rotation with the adaptive binarizer. Angles before 14 in the fixed
    // order: 0, 3, -3, 6, -6, 10, -10 (7 angles x 24 attempts each), plus
    // the direct decode; the winner is the first attempt of the 14-degree
    // block.
    let winning_call = 1 + 7 * 24;
    let primary = Arc::new(ScriptedEngine::succeed_on_call(
        "primary",
        winning_call,
        "4006381333931",
    ));
    let sink = Arc::new(MemorySink::new());
    let cascade = DecodeCascade::new(primary).with_sink(sink.clone());

    let outcome = cascade.decode_photo(&surface()).unwrap();
    let decoded = match outcome {
        DecodeOutcome::Decoded(d) => d,
        DecodeOutcome::Exhausted { .. } => {
            rp.check(false, "expected a decode");
            assert!(!rp.cleanup());
            return;
        }
    };

    rp.compare_values(14.0, decoded.provenance.rotation_deg as f64, 0.0);
    rp.check(
        decoded.provenance.region == RegionCrop::Full,
        "full frame variant of the 14-degree block",
    );

    let snapshot = sink.snapshot();
    rp.compare_values((winning_call + 1) as f64, snapshot.len() as f64, 0.0);
    let winner = &snapshot[winning_call];
    rp.check(
        winner.binarizer == BinarizeMethod::AdaptiveLocal,
        "adaptive binarization on the winning attempt",
    );
    rp.check(
        snapshot[..winning_call]
            .iter()
            .all(|a| !a.outcome.is_decoded()),
        "every preceding attempt failed",
    );

    assert!(rp.cleanup(), "sweep variant regression test failed");
}

#[test]
fn panic_containment_reg() {
    let mut rp = RegParams::new("panic_containment");

    let sink = Arc::new(MemorySink::new());
    let options = CascadeOptions::default()
        .with_sweep_angles(vec![0.0])
        .with_binarizers(vec![BinarizeMethod::AdaptiveLocal])
        .with_profiles(vec![HintProfile::Wide])
        .with_stripe_fractions(vec![]);
    let cascade = DecodeCascade::new(Arc::new(PanickingEngine))
        .with_options(options)
        .with_sink(sink.clone());

    // Every attempt panics inside the engine; the cascade must still run
    // the whole search and report exhaustion
    let outcome = cascade.decode_photo(&surface()).unwrap();
    rp.check(
        matches!(outcome, DecodeOutcome::Exhausted { .. }),
        "exhausted despite engine panics",
    );
    rp.check(
        sink.snapshot()
            .iter()
            .all(|a| matches!(a.outcome, AttemptOutcome::Failed(FailureKind::EnginePanic))),
        "panics recorded as attempt failures",
    );

    assert!(rp.cleanup(), "panic containment regression test failed");
}

#[test]
fn live_path_reg() {
    let mut rp = RegParams::new("live_path");

    let primary = Arc::new(ScriptedEngine::succeed_on_call("primary", 0, "12345678"));
    let sink = Arc::new(MemorySink::new());
    let cascade = DecodeCascade::new(primary.clone()).with_sink(sink.clone());

    let read = cascade.decode_live_frame(&surface());
    rp.check(read.is_some(), "live frame decoded");
    rp.compare_values(1.0, primary.call_count() as f64, 0.0);
    rp.compare_values(1.0, sink.len() as f64, 0.0);

    // The quick path never sweeps: a miss is a single attempt
    let cascade_miss = DecodeCascade::new(Arc::new(ScriptedEngine::always_fail("primary")))
        .with_sink(sink.clone());
    let read = cascade_miss.decode_live_frame(&surface());
    rp.check(read.is_none(), "miss returns nothing");
    rp.compare_values(2.0, sink.len() as f64, 0.0);

    assert!(rp.cleanup(), "live path regression test failed");
}
