//! Diagnostics sink for strategy attempts
//!
//! The cascade mirrors every attempt to an [`AttemptSink`]. Sinks are
//! write-only from the pipeline's point of view and must never fail or
//! block the cascade; implementations swallow their own errors.

use crate::attempt::StrategyAttempt;
use std::sync::Mutex;

/// Append-only sink for [`StrategyAttempt`] records.
pub trait AttemptSink: Send + Sync {
    /// Record one attempt. Must not panic or block.
    fn record(&self, attempt: &StrategyAttempt);
}

/// A sink that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl AttemptSink for NullSink {
    fn record(&self, _attempt: &StrategyAttempt) {}
}

/// A sink that keeps every attempt in memory, for tests and interactive
/// troubleshooting.
#[derive(Debug, Default)]
pub struct MemorySink {
    attempts: Mutex<Vec<StrategyAttempt>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of recorded attempts.
    pub fn len(&self) -> usize {
        self.attempts.lock().map(|a| a.len()).unwrap_or(0)
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A copy of all recorded attempts, in record order.
    pub fn snapshot(&self) -> Vec<StrategyAttempt> {
        self.attempts.lock().map(|a| a.clone()).unwrap_or_default()
    }
}

impl AttemptSink for MemorySink {
    fn record(&self, attempt: &StrategyAttempt) {
        if let Ok(mut attempts) = self.attempts.lock() {
            attempts.push(attempt.clone());
        }
    }
}
