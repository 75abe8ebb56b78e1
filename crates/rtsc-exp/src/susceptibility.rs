use tracing::debug;

use crate::outcome::ValidationOutcome;
use crate::policy::SusceptibilityPolicy;
use crate::tables::SusceptibilityRow;

/// Diamagnetic shielding check on a temperature-sorted χ'(T) table.
pub fn evaluate_susceptibility(
    rows: &[SusceptibilityRow],
    expected_tc_k: Option<f64>,
    policy: &SusceptibilityPolicy,
) -> ValidationOutcome {
    let mut outcome = ValidationOutcome::default();
    outcome.threshold("min_shielding_fraction", policy.min_shielding_fraction);

    let chi_min = rows
        .iter()
        .map(|row| row.chi_real)
        .fold(f64::INFINITY, f64::min);
    if !chi_min.is_finite() {
        outcome.fail("susceptibility table is empty");
        return outcome.finish();
    }
    let shielding = -chi_min;
    outcome.metric("shielding_fraction", shielding);
    if shielding < policy.min_shielding_fraction {
        outcome.fail(format!(
            "shielding fraction {shielding:.3} below {:.3}",
            policy.min_shielding_fraction
        ));
    }

    let level = policy.onset_fraction * chi_min;
    let onset = (chi_min < 0.0)
        .then(|| {
            rows.iter()
                .rev()
                .find(|row| row.chi_real <= level)
                .map(|row| row.temperature_k)
        })
        .flatten();
    match onset {
        Some(tc) => {
            outcome.metric("onset_K", tc);
            if let Some(expected) = expected_tc_k.filter(|tc| *tc > 0.0) {
                outcome.check_relative("Tc", tc, expected, policy.tc_rel_tol);
            }
        }
        None => outcome.fail("no diamagnetic onset found"),
    }

    debug!(shielding, ?onset, "susceptibility evaluated");
    outcome.finish()
}
