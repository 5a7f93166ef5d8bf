//! Barscan Cascade - Ordered decode strategy search
//!
//! No single engine/preprocessing combination reliably reads every
//! real-world capture, so the cascade trades latency for recall: an
//! ordered, short-circuiting search over engines, geometric variants,
//! binarization policies and hint profiles. Cheapest and most likely
//! strategies run first; the first successful read wins and is
//! authoritative.
//!
//! The search order is fixed and deterministic:
//!
//! 1. Primary engine, direct decode of the unmodified surface
//! 2. Detector-slot engine (when present), raw and downscaled
//! 3. Primary engine over the full variant sweep:
//!    angles × binarizers × hint profiles × regions
//! 4. Fallback engine (when present) on the frame and its cardinal
//!    rotations
//!
//! Every attempt - including engine errors and contained panics - is
//! mirrored to an [`AttemptSink`](barscan_core::AttemptSink) before the
//! outcome is inspected.

mod cascade;
mod diagnostics;
mod error;
mod options;

pub use cascade::DecodeCascade;
pub use diagnostics::TracingSink;
pub use error::{CascadeError, CascadeResult};
pub use options::CascadeOptions;
