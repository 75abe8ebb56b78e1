use tracing::debug;

use crate::outcome::ValidationOutcome;
use crate::policy::TransportPolicy;
use crate::tables::TransportRow;

/// Temperature of the first upward crossing of `level`, linearly interpolated.
fn first_upward_crossing(rows: &[TransportRow], level: f64) -> Option<f64> {
    rows.windows(2).find_map(|pair| {
        let (lo, hi) = (pair[0], pair[1]);
        if lo.resistance_ohm < level && hi.resistance_ohm >= level {
            let span = hi.resistance_ohm - lo.resistance_ohm;
            let frac = (level - lo.resistance_ohm) / span;
            Some(lo.temperature_k + frac * (hi.temperature_k - lo.temperature_k))
        } else {
            None
        }
    })
}

/// Zero-resistance check on a temperature-sorted four-point table.
pub fn evaluate_transport(
    rows: &[TransportRow],
    expected_tc_k: Option<f64>,
    policy: &TransportPolicy,
) -> ValidationOutcome {
    let mut outcome = ValidationOutcome::default();
    outcome.threshold("max_residual_ratio", policy.max_residual_ratio);
    if rows.is_empty() {
        outcome.fail("transport table is empty");
        return outcome.finish();
    }

    let normal_count = ((rows.len() as f64 * policy.normal_state_fraction).ceil() as usize)
        .clamp(1, rows.len());
    let normal = &rows[rows.len() - normal_count..];
    let r_n = normal.iter().map(|row| row.resistance_ohm).sum::<f64>() / normal_count as f64;
    outcome.metric("R_n_ohm", r_n);
    if r_n <= 0.0 {
        outcome.fail(format!("normal-state resistance {r_n:.3e} Ω is not positive"));
        return outcome.finish();
    }

    let r_min = rows
        .iter()
        .map(|row| row.resistance_ohm)
        .fold(f64::INFINITY, f64::min);
    let residual = r_min / r_n;
    outcome.metric("residual_ratio", residual);
    if residual > policy.max_residual_ratio {
        outcome.fail(format!(
            "residual resistance ratio {residual:.3e} exceeds {:.1e}",
            policy.max_residual_ratio
        ));
    }

    match first_upward_crossing(rows, 0.5 * r_n) {
        Some(tc) => {
            outcome.metric("Tc_K", tc);
            if let Some(expected) = expected_tc_k.filter(|tc| *tc > 0.0) {
                outcome.check_relative("Tc", tc, expected, policy.tc_rel_tol);
            }
        }
        None => outcome.fail("no upward crossing of R_n/2; transition not observed"),
    }

    debug!(r_n, residual, passed = outcome.notes.is_empty(), "transport evaluated");
    outcome.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sharp_transition(tc: f64) -> Vec<TransportRow> {
        (0..=100)
            .map(|i| {
                let t = 250.0 + i as f64;
                TransportRow {
                    temperature_k: t,
                    resistance_ohm: if t < tc { 0.0 } else { 100.0 },
                }
            })
            .collect()
    }

    #[test]
    fn zero_resistance_transition_passes() {
        let policy = TransportPolicy::default();
        let outcome = evaluate_transport(&sharp_transition(300.5), Some(300.0), &policy);
        assert!(outcome.passed, "{:?}", outcome.notes);
        assert_eq!(outcome.metrics["R_n_ohm"], 100.0);
        assert_eq!(outcome.metrics["residual_ratio"], 0.0);
        assert!((outcome.metrics["Tc_K"] - 300.5).abs() < 1e-9);
    }

    #[test]
    fn finite_residual_fails() {
        let mut rows = sharp_transition(300.5);
        for row in rows.iter_mut().filter(|row| row.resistance_ohm == 0.0) {
            row.resistance_ohm = 1.0;
        }
        let outcome = evaluate_transport(&rows, None, &TransportPolicy::default());
        assert!(!outcome.passed);
        assert!(outcome.notes[0].contains("residual resistance ratio"));
    }

    #[test]
    fn wrong_tc_fails_tolerance() {
        let policy = TransportPolicy::default();
        let outcome = evaluate_transport(&sharp_transition(300.5), Some(400.0), &policy);
        assert!(!outcome.passed);
        assert!(outcome.metrics["Tc_rel_error"] > 0.15);
    }

    #[test]
    fn metallic_curve_has_no_crossing() {
        let rows: Vec<TransportRow> = (0..10)
            .map(|i| TransportRow {
                temperature_k: 250.0 + i as f64,
                resistance_ohm: 100.0,
            })
            .collect();
        let outcome = evaluate_transport(&rows, None, &TransportPolicy::default());
        assert!(!outcome.passed);
        assert!(!outcome.metrics.contains_key("Tc_K"));
    }
}
