use rtsc_core::errors::RtscError;
use serde::{Deserialize, Serialize};

use crate::bounds::Interval;
use crate::gap::gap_to_tc_ratio;

/// Success criteria for a room-temperature candidate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AcceptancePolicy {
    /// Minimum ω_log in meV.
    #[serde(default = "AcceptancePolicy::default_omega_log_min")]
    pub omega_log_min_mev: f64,
    /// Minimum gap Δ in meV.
    #[serde(default = "AcceptancePolicy::default_gap_min")]
    pub gap_min_mev: f64,
    /// Minimum 2Δ/(kB Tc).
    #[serde(default = "AcceptancePolicy::default_ratio_min")]
    pub ratio_min: f64,
    /// Accepted λ_eff window.
    #[serde(default = "AcceptancePolicy::default_lambda_window")]
    pub lambda_eff: Interval,
    /// Maximum μ*.
    #[serde(default = "AcceptancePolicy::default_mu_star_max")]
    pub mu_star_max: f64,
    /// Minimum f_ω.
    #[serde(default = "AcceptancePolicy::default_f_omega_min")]
    pub f_omega_min: f64,
}

impl AcceptancePolicy {
    const fn default_omega_log_min() -> f64 {
        120.0
    }

    const fn default_gap_min() -> f64 {
        60.0
    }

    const fn default_ratio_min() -> f64 {
        4.5
    }

    const fn default_lambda_window() -> Interval {
        Interval::new(2.5, 2.7)
    }

    const fn default_mu_star_max() -> f64 {
        0.12
    }

    const fn default_f_omega_min() -> f64 {
        1.35
    }
}

impl Default for AcceptancePolicy {
    fn default() -> Self {
        Self {
            omega_log_min_mev: Self::default_omega_log_min(),
            gap_min_mev: Self::default_gap_min(),
            ratio_min: Self::default_ratio_min(),
            lambda_eff: Self::default_lambda_window(),
            mu_star_max: Self::default_mu_star_max(),
            f_omega_min: Self::default_f_omega_min(),
        }
    }
}

/// Measured-quantity acceptance flags.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AcceptanceReport {
    /// ω_log above the minimum.
    pub omega_log_pass: bool,
    /// Gap above the minimum.
    pub gap_pass: bool,
    /// 2Δ/(kB Tc) above the minimum.
    pub ratio_pass: bool,
    /// AND of the three flags.
    pub overall_pass: bool,
    /// Computed 2Δ/(kB Tc).
    pub ratio: f64,
}

/// Candidate parameter acceptance flags.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParameterAcceptance {
    /// ω_log above the minimum.
    pub omega_log_pass: bool,
    /// λ_eff inside the accepted window.
    pub lambda_eff_pass: bool,
    /// μ* not above the maximum.
    pub mu_star_pass: bool,
    /// f_ω above the minimum.
    pub f_omega_pass: bool,
    /// AND of the four flags.
    pub overall_pass: bool,
}

/// Checks measured ω_log, gap and Tc against `policy`.
pub fn validate_acceptance(
    omega_log_mev: f64,
    delta_mev: f64,
    tc_k: f64,
    policy: &AcceptancePolicy,
) -> Result<AcceptanceReport, RtscError> {
    let ratio = gap_to_tc_ratio(delta_mev, tc_k)?;
    let omega_log_pass = omega_log_mev >= policy.omega_log_min_mev;
    let gap_pass = delta_mev >= policy.gap_min_mev;
    let ratio_pass = ratio >= policy.ratio_min;
    Ok(AcceptanceReport {
        omega_log_pass,
        gap_pass,
        ratio_pass,
        overall_pass: omega_log_pass && gap_pass && ratio_pass,
        ratio,
    })
}

/// Checks a candidate parameter set against `policy`.
pub fn validate_rtsc_parameters(
    omega_log_mev: f64,
    lambda_eff: f64,
    mu_star: f64,
    f_omega: f64,
    policy: &AcceptancePolicy,
) -> ParameterAcceptance {
    let omega_log_pass = omega_log_mev >= policy.omega_log_min_mev;
    let lambda_eff_pass = policy.lambda_eff.contains_closed(lambda_eff);
    let mu_star_pass = mu_star <= policy.mu_star_max;
    let f_omega_pass = f_omega >= policy.f_omega_min;
    ParameterAcceptance {
        omega_log_pass,
        lambda_eff_pass,
        mu_star_pass,
        f_omega_pass,
        overall_pass: omega_log_pass && lambda_eff_pass && mu_star_pass && f_omega_pass,
    }
}
