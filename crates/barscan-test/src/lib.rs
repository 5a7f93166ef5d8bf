//! barscan-test - Test support for the barscan workspace
//!
//! Provides what the member crates' tests need and nothing more:
//!
//! - Synthetic EAN-13 rendering ([`synth`]) so decode tests never depend
//!   on image files
//! - Scripted engines, catalogs and capture devices ([`mock`])
//! - A regression parameter harness ([`RegParams`]) tracking value
//!   comparisons across a test body
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: set to "display" to run regression tests without
//!   failing on comparisons

pub mod mock;
mod params;
pub mod synth;

pub use mock::{
    FailingCatalog, MockCatalog, MockDevice, MockProvider, PanickingEngine, ScriptedEngine,
    sample_product,
};
pub use params::{RegParams, RegTestMode};

// The in-memory diagnostics sink lives in core; re-exported here because
// nearly every cascade test wants it next to the mocks.
pub use barscan_core::MemorySink;

/// Install a fmt subscriber honoring `RUST_LOG`, once per process.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
