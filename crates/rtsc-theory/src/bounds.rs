use rtsc_core::errors::RtscError;
use serde::{Deserialize, Serialize};

use crate::allen_dynes::{denominator_error, DenominatorForm, ThermalParameters};

/// Numeric interval; openness is decided by the check using it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Interval {
    /// Lower end.
    pub min: f64,
    /// Upper end.
    pub max: f64,
}

impl Interval {
    /// Creates an interval.
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Inclusive membership test.
    pub fn contains_closed(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Exclusive membership test.
    pub fn contains_open(&self, value: f64) -> bool {
        value > self.min && value < self.max
    }
}

/// Physical plausibility bounds enforced on CLI inputs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParameterBounds {
    /// Closed range for ω_log in meV.
    #[serde(default = "ParameterBounds::default_omega_log_mev")]
    pub omega_log_mev: Interval,
    /// Largest believable λ_eff.
    #[serde(default = "ParameterBounds::default_lambda_max")]
    pub lambda_max: f64,
    /// Open range for μ*.
    #[serde(default = "ParameterBounds::default_mu_star")]
    pub mu_star: Interval,
    /// Closed range for f_ω.
    #[serde(default = "ParameterBounds::default_f_omega")]
    pub f_omega: Interval,
}

impl ParameterBounds {
    const fn default_omega_log_mev() -> Interval {
        Interval::new(10.0, 1000.0)
    }

    const fn default_lambda_max() -> f64 {
        10.0
    }

    const fn default_mu_star() -> Interval {
        Interval::new(0.01, 0.3)
    }

    const fn default_f_omega() -> Interval {
        Interval::new(1.0, 1.5)
    }
}

impl Default for ParameterBounds {
    fn default() -> Self {
        Self {
            omega_log_mev: Self::default_omega_log_mev(),
            lambda_max: Self::default_lambda_max(),
            mu_star: Self::default_mu_star(),
            f_omega: Self::default_f_omega(),
        }
    }
}

/// Checks calculator inputs against `bounds`; the first violation wins.
///
/// Order: ω_log, λ, McMillan denominator, μ*, f_ω. The denominator is
/// checked before the μ* range so a μ* far above its range is reported
/// together with the critical value that would fix it.
pub fn validate_calc_inputs(
    params: &ThermalParameters,
    lambda_eff: f64,
    bounds: &ParameterBounds,
) -> Result<(), RtscError> {
    let omega_mev = params.omega_log.mev();
    let omega = bounds.omega_log_mev;
    if !omega.contains_closed(omega_mev) {
        let given = format!("{:?} {}", params.omega_log.value, params.omega_log.unit);
        return Err(RtscError::out_of_range(
            "omega_log",
            format!(
                "omega_log={given} ({omega_mev:.3} meV) out of physical range [{}, {}] meV \
                 (logarithmic phonon frequency)",
                omega.min, omega.max
            ),
        ));
    }

    if lambda_eff.is_nan() || lambda_eff <= 0.0 {
        return Err(RtscError::out_of_range(
            "lambda",
            format!("lambda={lambda_eff:?} must be > 0 (electron-phonon coupling strength)"),
        ));
    }
    if lambda_eff > bounds.lambda_max {
        return Err(RtscError::out_of_range(
            "lambda",
            format!(
                "lambda={lambda_eff:?} is unrealistically large (electron-phonon coupling \
                 strength, expected ≤ {})",
                bounds.lambda_max
            ),
        ));
    }

    let form = DenominatorForm::McMillan;
    let denominator = form.denominator(lambda_eff, params.mu_star);
    if denominator.is_nan() || denominator <= 0.0 {
        return Err(denominator_error(
            form,
            lambda_eff,
            params.mu_star,
            denominator,
        ));
    }

    let mu = bounds.mu_star;
    if !mu.contains_open(params.mu_star) {
        return Err(RtscError::out_of_range(
            "mu_star",
            format!(
                "mu*={:?} must be in ({}, {}) (Coulomb pseudopotential range)",
                params.mu_star, mu.min, mu.max
            ),
        ));
    }

    let f = bounds.f_omega;
    if !f.contains_closed(params.f_omega) {
        return Err(RtscError::out_of_range(
            "f_omega",
            format!(
                "f_omega={:?} out of allowed range [{:?}, {:?}] (spectral shape factor)",
                params.f_omega, f.min, f.max
            ),
        ));
    }
    Ok(())
}
