//! Tracing-backed diagnostics sink
//!
//! The default [`AttemptSink`]: every attempt becomes one structured
//! tracing event. Emitting an event cannot fail, which satisfies the
//! sink contract of never throwing back into the cascade.

use barscan_core::{AttemptOutcome, AttemptSink, StrategyAttempt};
use tracing::debug;

/// Sink writing each attempt as a `tracing` debug event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl AttemptSink for TracingSink {
    fn record(&self, attempt: &StrategyAttempt) {
        let outcome = match &attempt.outcome {
            AttemptOutcome::Decoded { text, .. } => format!("decoded {text:?}"),
            AttemptOutcome::Failed(kind) => format!("failed: {kind:?}"),
        };
        debug!(
            seq = attempt.seq,
            engine = attempt.engine,
            profile = attempt.profile.name(),
            binarizer = attempt.binarizer.name(),
            rotation = attempt.provenance.rotation_deg,
            region = ?attempt.provenance.region,
            outcome = %outcome,
            "decode attempt"
        );
    }
}
