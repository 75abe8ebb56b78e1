use std::collections::BTreeMap;

use rtsc_core::errors::RtscError;
use serde::{Deserialize, Serialize};

use crate::allen_dynes::calculate_tc;
use crate::gap::strong_coupling_gap_mev;

/// Tc above which a grid point counts as room temperature.
pub const RTSC_THRESHOLD_K: f64 = 300.0;

const GOLDEN: f64 = 0.618_033_988_749_894_9;

/// Reference point for sensitivity analysis.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BaseParameters {
    /// ω_log in meV.
    pub omega_log_mev: f64,
    /// Effective coupling.
    pub lambda_eff: f64,
    /// Coulomb pseudopotential.
    pub mu_star: f64,
}

impl BaseParameters {
    fn tc(&self) -> f64 {
        calculate_tc(self.omega_log_mev, self.lambda_eff, self.mu_star)
    }

    fn with(&self, name: &str, value: f64) -> Self {
        let mut out = *self;
        match name {
            "omega_log" => out.omega_log_mev = value,
            "lambda_eff" => out.lambda_eff = value,
            _ => out.mu_star = value,
        }
        out
    }

    fn entries(&self) -> [(&'static str, f64); 3] {
        [
            ("omega_log", self.omega_log_mev),
            ("lambda_eff", self.lambda_eff),
            ("mu_star", self.mu_star),
        ]
    }
}

/// Central-difference derivatives and dimensionless sensitivities.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SensitivityReport {
    /// Tc at the reference point, in K.
    pub base_tc_k: f64,
    /// Fractional step used for the differences.
    pub variation: f64,
    /// `d_tc_d_<param>` and `<param>_sensitivity` entries.
    pub coefficients: BTreeMap<String, f64>,
}

/// Sensitivity of the calculator Tc to ω_log, λ and μ*.
pub fn sensitivity_analysis(
    base: &BaseParameters,
    variation: f64,
) -> Result<SensitivityReport, RtscError> {
    if !(variation > 0.0 && variation < 1.0) {
        return Err(RtscError::out_of_range(
            "variation",
            format!("variation={variation:?} must be in (0, 1)"),
        ));
    }
    if let Some((name, value)) = base
        .entries()
        .into_iter()
        .find(|(_, value)| !(value.is_finite() && *value > 0.0))
    {
        return Err(RtscError::out_of_range(
            name,
            format!("{name}={value:?} must be > 0 for a relative step"),
        ));
    }
    let base_tc_k = base.tc();
    if base_tc_k <= 0.0 {
        return Err(RtscError::out_of_range(
            "base",
            "reference parameters predict Tc = 0; sensitivities are undefined",
        ));
    }
    let mut coefficients = BTreeMap::new();
    for (name, value) in base.entries() {
        let tc_plus = base.with(name, value * (1.0 + variation)).tc();
        let tc_minus = base.with(name, value * (1.0 - variation)).tc();
        let derivative = (tc_plus - tc_minus) / (2.0 * variation * value);
        coefficients.insert(format!("d_tc_d_{name}"), derivative);
        coefficients.insert(
            format!("{name}_sensitivity"),
            (derivative * value / base_tc_k).abs(),
        );
    }
    Ok(SensitivityReport {
        base_tc_k,
        variation,
        coefficients,
    })
}

/// Coupling that reproduces a target Tc at fixed ω_log and μ*.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OptimalParameters {
    /// ω_log in meV.
    pub omega_log_mev: f64,
    /// Optimised λ_eff.
    pub lambda_eff: f64,
    /// μ* held fixed.
    pub mu_star: f64,
    /// Tc at the optimum, in K.
    pub predicted_tc_k: f64,
    /// Strong-coupling Δ0 at the target Tc, in meV.
    pub gap0_mev: f64,
}

/// Bounded golden-section search of |Tc(λ) − target| over λ ∈ [1, 4].
pub fn optimize_lambda(
    target_tc_k: f64,
    omega_log_mev: f64,
    mu_star: f64,
) -> Result<OptimalParameters, RtscError> {
    if target_tc_k.is_nan() || target_tc_k <= 0.0 {
        return Err(RtscError::out_of_range(
            "target_tc",
            format!("target Tc={target_tc_k:?} K must be > 0"),
        ));
    }
    let objective =
        |lambda: f64| (calculate_tc(omega_log_mev, lambda, mu_star) - target_tc_k).abs();
    let (mut lo, mut hi) = (1.0_f64, 4.0_f64);
    let mut x1 = hi - GOLDEN * (hi - lo);
    let mut x2 = lo + GOLDEN * (hi - lo);
    let mut f1 = objective(x1);
    let mut f2 = objective(x2);
    for _ in 0..200 {
        if hi - lo < 1e-8 {
            break;
        }
        if f1 <= f2 {
            hi = x2;
            x2 = x1;
            f2 = f1;
            x1 = hi - GOLDEN * (hi - lo);
            f1 = objective(x1);
        } else {
            lo = x1;
            x1 = x2;
            f1 = f2;
            x2 = lo + GOLDEN * (hi - lo);
            f2 = objective(x2);
        }
    }
    let lambda_eff = 0.5 * (lo + hi);
    Ok(OptimalParameters {
        omega_log_mev,
        lambda_eff,
        mu_star,
        predicted_tc_k: calculate_tc(omega_log_mev, lambda_eff, mu_star),
        gap0_mev: strong_coupling_gap_mev(target_tc_k, lambda_eff),
    })
}

/// Tc over an (ω_log, λ) grid at fixed μ*.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParameterMap {
    /// ω_log axis in meV.
    pub omega_log_mev: Vec<f64>,
    /// λ axis.
    pub lambda_eff: Vec<f64>,
    /// μ* used for every point.
    pub mu_star: f64,
    /// `tc_k[i][j]` is Tc at `lambda_eff[i]`, `omega_log_mev[j]`.
    pub tc_k: Vec<Vec<f64>>,
    /// Whether each grid point reaches [`RTSC_THRESHOLD_K`].
    pub rtsc_region: Vec<Vec<bool>>,
}

fn linspace(range: (f64, f64), n: usize) -> Vec<f64> {
    let step = (range.1 - range.0) / (n - 1) as f64;
    (0..n).map(|i| range.0 + step * i as f64).collect()
}

/// Evaluates the calculator Tc on a `resolution × resolution` grid.
pub fn parameter_space_map(
    omega_range_mev: (f64, f64),
    lambda_range: (f64, f64),
    resolution: usize,
    mu_star: f64,
) -> Result<ParameterMap, RtscError> {
    if resolution < 2 {
        return Err(RtscError::out_of_range(
            "resolution",
            format!("resolution={resolution} must be at least 2"),
        ));
    }
    let omega_log_mev = linspace(omega_range_mev, resolution);
    let lambda_eff = linspace(lambda_range, resolution);
    let tc_k: Vec<Vec<f64>> = lambda_eff
        .iter()
        .map(|lambda| {
            omega_log_mev
                .iter()
                .map(|omega| calculate_tc(*omega, *lambda, mu_star))
                .collect()
        })
        .collect();
    let rtsc_region = tc_k
        .iter()
        .map(|row| row.iter().map(|tc| *tc >= RTSC_THRESHOLD_K).collect())
        .collect();
    Ok(ParameterMap {
        omega_log_mev,
        lambda_eff,
        mu_star,
        tc_k,
        rtsc_region,
    })
}
