use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Result of one measurement channel check.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    /// Whether every criterion of the channel held.
    pub passed: bool,
    /// Measured quantities; metrics that could not be formed are omitted.
    pub metrics: BTreeMap<String, f64>,
    /// Thresholds the metrics were compared against.
    pub thresholds: BTreeMap<String, f64>,
    /// Reasons for failure, in evaluation order.
    #[serde(default)]
    pub notes: Vec<String>,
}

impl ValidationOutcome {
    pub(crate) fn metric(&mut self, name: &str, value: f64) {
        self.metrics.insert(name.to_string(), value);
    }

    pub(crate) fn threshold(&mut self, name: &str, value: f64) {
        self.thresholds.insert(name.to_string(), value);
    }

    pub(crate) fn fail(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }

    pub(crate) fn finish(mut self) -> Self {
        self.passed = self.notes.is_empty();
        self
    }

    /// Compares `measured` with `expected` and records the relative error.
    pub(crate) fn check_relative(
        &mut self,
        label: &str,
        measured: f64,
        expected: f64,
        tolerance: f64,
    ) {
        let error = (measured - expected).abs() / expected;
        self.metric(&format!("{label}_rel_error"), error);
        self.threshold(&format!("{label}_rel_tol"), tolerance);
        if error > tolerance {
            self.fail(format!(
                "{label} {measured:.3} deviates from expected {expected:.3} by {:.1}% (> {:.1}%)",
                100.0 * error,
                100.0 * tolerance
            ));
        }
    }
}

/// Aggregate pass/fail of an analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    /// Every channel passed.
    Pass,
    /// At least one channel failed.
    Fail,
}

impl Verdict {
    /// PASS iff every outcome passed.
    pub fn from_outcomes<'a>(outcomes: impl IntoIterator<Item = &'a ValidationOutcome>) -> Self {
        if outcomes.into_iter().all(|outcome| outcome.passed) {
            Verdict::Pass
        } else {
            Verdict::Fail
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Pass => write!(f, "PASS"),
            Verdict::Fail => write!(f, "FAIL"),
        }
    }
}
