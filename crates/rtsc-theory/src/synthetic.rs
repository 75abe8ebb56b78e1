//! Seeded synthetic transport, gap and α²F(ω) data.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use rtsc_core::errors::RtscError;
use serde::{Deserialize, Serialize};

use crate::gap::{gap_at_temperature, strong_coupling_gap_mev};
use crate::spectral::{f_omega_from_alpha2f, omega_log_from_alpha2f, DEFAULT_OMEGA_CUTOFF_MEV};

const TEMPERATURE_POINTS: usize = 100;
const FREQUENCY_POINTS: usize = 1000;
const SUPERCONDUCTING_RESISTANCE_OHM: f64 = 1e-6;

/// Inputs for [`generate_synthetic_data`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SyntheticParams {
    /// ω_log in meV.
    pub omega_log_mev: f64,
    /// Effective coupling.
    pub lambda_eff: f64,
    /// Coulomb pseudopotential.
    pub mu_star: f64,
    /// Transition temperature to imprint, in K.
    pub tc_k: f64,
}

/// Generated curves and the spectral moments derived from them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SyntheticData {
    /// Temperature grid in K.
    pub temperature_k: Vec<f64>,
    /// Noisy resistance in Ω.
    pub resistance_ohm: Vec<f64>,
    /// BCS-like gap Δ(T) in meV.
    pub gap_mev: Vec<f64>,
    /// Frequency grid in meV.
    pub frequencies_mev: Vec<f64>,
    /// Model Eliashberg function.
    pub alpha2f: Vec<f64>,
    /// ω_log recovered from `alpha2f`, in meV.
    pub omega_log_mev: f64,
    /// f_ω recovered from `alpha2f`.
    pub f_omega: f64,
}

fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    let step = (end - start) / (n - 1) as f64;
    (0..n).map(|i| start + step * i as f64).collect()
}

fn temperature_window(tc_k: f64) -> (f64, f64) {
    if (250.0..=350.0).contains(&tc_k) {
        (250.0, 350.0)
    } else {
        ((tc_k - 50.0).max(1.0), tc_k + 50.0)
    }
}

fn model_alpha2f(frequency_mev: f64) -> f64 {
    let hydrogen = 0.8 * (-((frequency_mev - 150.0) / 20.0).powi(2)).exp();
    let plasmon = 0.3 * (-((frequency_mev - 80.0) / 15.0).powi(2)).exp();
    let acoustic = 0.1 * (-frequency_mev / 30.0).exp();
    hydrogen + plasmon + acoustic
}

/// Generates reproducible test data for a given `seed`.
///
/// Noise on R(T) is Gaussian with σ = `noise_level` × mean(R).
pub fn generate_synthetic_data(
    params: &SyntheticParams,
    noise_level: f64,
    seed: u64,
) -> Result<SyntheticData, RtscError> {
    if params.tc_k.is_nan() || params.tc_k <= 0.0 {
        return Err(RtscError::out_of_range(
            "tc",
            format!("tc={:?} K must be > 0", params.tc_k),
        ));
    }
    if noise_level.is_nan() || noise_level < 0.0 {
        return Err(RtscError::out_of_range(
            "noise_level",
            format!("noise_level={noise_level:?} must be ≥ 0"),
        ));
    }
    let tc = params.tc_k;
    let gap0 = strong_coupling_gap_mev(tc, params.lambda_eff);
    let (t_lo, t_hi) = temperature_window(tc);
    let temperature_k = linspace(t_lo, t_hi, TEMPERATURE_POINTS);

    let clean: Vec<f64> = temperature_k
        .iter()
        .map(|t| {
            if *t > tc {
                100.0 + 0.1 * (t - 300.0)
            } else {
                SUPERCONDUCTING_RESISTANCE_OHM
            }
        })
        .collect();
    let sigma = noise_level * clean.iter().sum::<f64>() / clean.len() as f64;
    let mut rng = StdRng::seed_from_u64(seed);
    let resistance_ohm = clean
        .iter()
        .map(|r| r + sigma * rng.sample::<f64, _>(StandardNormal))
        .collect();

    let gap_mev = temperature_k
        .iter()
        .map(|t| gap_at_temperature(gap0, *t, tc))
        .collect();

    let frequencies_mev = linspace(10.0, 300.0, FREQUENCY_POINTS);
    let alpha2f: Vec<f64> = frequencies_mev.iter().map(|w| model_alpha2f(*w)).collect();
    let omega_log_mev = omega_log_from_alpha2f(&frequencies_mev, &alpha2f)?;
    let f_omega = f_omega_from_alpha2f(&frequencies_mev, &alpha2f, DEFAULT_OMEGA_CUTOFF_MEV)?;

    Ok(SyntheticData {
        temperature_k,
        resistance_ohm,
        gap_mev,
        frequencies_mev,
        alpha2f,
        omega_log_mev,
        f_omega,
    })
}
