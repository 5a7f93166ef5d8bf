//! Strategy attempts and decode outcomes
//!
//! A decode request produces an ordered, append-only sequence of
//! [`StrategyAttempt`] records - one per (engine, variant, hints) triple
//! tried - and exactly one terminal [`DecodeOutcome`].

use crate::symbology::Symbology;
use crate::variant::{BinarizeMethod, HintProfile, VariantProvenance};

/// Why a single attempt failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// The engine ran but found no barcode
    NotFound,
    /// The engine reported an internal error
    EngineError(String),
    /// The engine panicked; contained and treated as a failed attempt
    EnginePanic,
}

/// Outcome of a single strategy attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptOutcome {
    /// The engine extracted a barcode string
    Decoded {
        text: String,
        symbology: Option<Symbology>,
    },
    /// The attempt failed; the cascade moves on to the next combination
    Failed(FailureKind),
}

impl AttemptOutcome {
    /// Whether this attempt decoded a barcode.
    pub fn is_decoded(&self) -> bool {
        matches!(self, AttemptOutcome::Decoded { .. })
    }
}

/// One (engine, variant, hint-set) try and its outcome.
///
/// `seq` is the 0-based position in the request's attempt order and is
/// strictly increasing; attempts are never retried or reordered.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyAttempt {
    /// 0-based position in the request's attempt order
    pub seq: usize,
    /// Engine identifier (stable adapter name)
    pub engine: &'static str,
    /// Provenance of the variant that was decoded
    pub provenance: VariantProvenance,
    /// Hint profile the attempt ran under
    pub profile: HintProfile,
    /// Binarization policy the engine was asked to apply
    pub binarizer: BinarizeMethod,
    /// What came of the attempt
    pub outcome: AttemptOutcome,
}

/// A successfully extracted barcode with its origin.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedBarcode {
    /// The decoded text
    pub text: String,
    /// Symbology reported by the engine, when known
    pub symbology: Option<Symbology>,
    /// Engine that produced the read
    pub engine: &'static str,
    /// Variant the read came from
    pub provenance: VariantProvenance,
    /// Sequence number of the winning attempt
    pub attempt_seq: usize,
}

/// Terminal result of a decode request.
///
/// Produced exactly once per request and consumed exactly once by the
/// result router.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeOutcome {
    /// A barcode was extracted; all further attempts were skipped
    Decoded(DecodedBarcode),
    /// Every strategy/variant combination was tried without success
    Exhausted {
        /// Total number of attempts made
        attempts: usize,
    },
}

impl DecodeOutcome {
    /// Whether the request decoded successfully.
    pub fn is_decoded(&self) -> bool {
        matches!(self, DecodeOutcome::Decoded(_))
    }

    /// The decoded text, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            DecodeOutcome::Decoded(d) => Some(&d.text),
            DecodeOutcome::Exhausted { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_accessors() {
        let decoded = DecodeOutcome::Decoded(DecodedBarcode {
            text: "4006381333931".to_string(),
            symbology: Some(Symbology::Ean13),
            engine: "rxing",
            provenance: VariantProvenance::full(),
            attempt_seq: 0,
        });
        assert!(decoded.is_decoded());
        assert_eq!(decoded.text(), Some("4006381333931"));

        let exhausted = DecodeOutcome::Exhausted { attempts: 42 };
        assert!(!exhausted.is_decoded());
        assert_eq!(exhausted.text(), None);
    }

    #[test]
    fn test_attempt_outcome_is_decoded() {
        let ok = AttemptOutcome::Decoded {
            text: "123".to_string(),
            symbology: None,
        };
        assert!(ok.is_decoded());
        assert!(!AttemptOutcome::Failed(FailureKind::NotFound).is_decoded());
    }
}
