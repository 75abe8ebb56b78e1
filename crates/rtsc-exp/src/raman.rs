use tracing::debug;

use crate::outcome::ValidationOutcome;
use crate::policy::RamanPolicy;
use crate::tables::RamanRow;

/// Compares the strongest Raman feature with the predicted 2Δ.
pub fn evaluate_raman_gap(
    rows: &[RamanRow],
    expected_2delta_mev: f64,
    policy: &RamanPolicy,
) -> ValidationOutcome {
    let mut outcome = ValidationOutcome::default();
    outcome.threshold("min_shift_meV", policy.min_shift_mev);
    outcome.metric("expected_2delta_meV", expected_2delta_mev);

    let peak = rows
        .iter()
        .filter(|row| row.shift_mev >= policy.min_shift_mev)
        .max_by(|a, b| a.intensity.total_cmp(&b.intensity));
    let Some(peak) = peak else {
        outcome.fail(format!("no Raman samples above {} meV", policy.min_shift_mev));
        return outcome.finish();
    };
    outcome.metric("peak_shift_meV", peak.shift_mev);

    if expected_2delta_mev > 0.0 {
        outcome.check_relative("gap", peak.shift_mev, expected_2delta_mev, policy.gap_rel_tol);
    } else {
        outcome.fail(format!(
            "expected 2Δ = {expected_2delta_mev:.3} meV; no gap is predicted"
        ));
    }

    debug!(peak = peak.shift_mev, expected_2delta_mev, "raman evaluated");
    outcome.finish()
}
