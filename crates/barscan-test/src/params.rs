//! Regression test parameters and operations
//!
//! Tracks a sequence of value comparisons across one test body and
//! reports every failure together at the end, so a single run shows all
//! regressions instead of stopping at the first.

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Compare values and fail on mismatch (default)
    #[default]
    Compare,
    /// Run without failing comparisons, for inspection
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable.
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// Tracks the test name, comparison index, mode, and success status.
pub struct RegParams {
    /// Name of the test (e.g., "cascade_order")
    pub test_name: String,
    index: usize,
    /// Test mode
    pub mode: RegTestMode,
    success: bool,
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// The current comparison index.
    pub fn index(&self) -> usize {
        self.index
    }

    fn fail(&mut self, message: String) {
        eprintln!("{}", message);
        if self.mode == RegTestMode::Compare {
            self.failures.push(message);
            self.success = false;
        }
    }

    /// Compare two floating-point values within a delta.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();
        if diff > delta {
            self.fail(format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            ));
            false
        } else {
            true
        }
    }

    /// Compare two strings for equality.
    pub fn compare_text(&mut self, expected: &str, actual: &str) -> bool {
        self.index += 1;
        if expected != actual {
            self.fail(format!(
                "Failure in {}_reg: text comparison for index {}\n\
                 expected = {:?}, actual = {:?}",
                self.test_name, self.index, expected, actual
            ));
            false
        } else {
            true
        }
    }

    /// Require a condition to hold.
    pub fn check(&mut self, condition: bool, what: &str) -> bool {
        self.index += 1;
        if !condition {
            self.fail(format!(
                "Failure in {}_reg: condition for index {}: {}",
                self.test_name, self.index, what
            ));
        }
        condition
    }

    /// Clean up and report results.
    ///
    /// Returns `true` if all comparisons passed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();
        self.success
    }

    /// Whether all comparisons so far have passed.
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Recorded failures.
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}
