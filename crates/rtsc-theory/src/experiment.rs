use rtsc_core::errors::RtscError;
use serde::{Deserialize, Serialize};

use crate::acceptance::{validate_rtsc_parameters, AcceptancePolicy, ParameterAcceptance};
use crate::artifacts::{detect_artifacts, ArtifactReport, IvSweep, ResistanceCurve};
use crate::gap::{estimate_lambda_from_gap, gap_to_tc_ratio};
use crate::spectral::{f_omega_from_alpha2f, omega_log_from_alpha2f, DEFAULT_OMEGA_CUTOFF_MEV};

/// μ* assumed when judging a parameter set inferred from measurements.
pub const ASSUMED_MU_STAR: f64 = 0.10;

/// Eliashberg function sampled from an infrared (FTIR) measurement.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SpectralFunction {
    /// Frequencies in meV.
    pub frequencies_mev: Vec<f64>,
    /// α²F(ω) at each frequency.
    pub alpha2f: Vec<f64>,
}

/// Measurements available for a candidate; every channel is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExperimentalData {
    /// α²F(ω) from FTIR.
    #[serde(default)]
    pub spectral: Option<SpectralFunction>,
    /// Tunnelling (STS) gap Δ at the operating temperature, in meV.
    #[serde(default)]
    pub gap_mev: Option<f64>,
    /// Transition temperature seen in transport, in K.
    #[serde(default)]
    pub transport_tc_k: Option<f64>,
    /// Fractional resistance drop across the transition.
    #[serde(default)]
    pub resistance_drop: Option<f64>,
    /// I-V sweep used for the heating check.
    #[serde(default)]
    pub iv_sweep: Option<IvSweep>,
    /// R(T) curve used for the ionic-conduction check.
    #[serde(default)]
    pub resistance_curve: Option<ResistanceCurve>,
}

/// Quantities derived from [`ExperimentalData`].
///
/// A field is `None` when the measurements it needs were not supplied.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExperimentalAnalysis {
    /// ω_log from α²F, in meV.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub omega_log_mev: Option<f64>,
    /// f_ω from α²F.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub f_omega: Option<f64>,
    /// STS gap, in meV.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gap_mev: Option<f64>,
    /// 2Δ/(kB Tc) from the STS gap and the transport Tc.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gap_ratio: Option<f64>,
    /// Transport Tc, in K.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tc_transport_k: Option<f64>,
    /// Resistance drop; 0 when a transport Tc is given without one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resistance_drop: Option<f64>,
    /// λ_eff inverted from the gap and the transport Tc.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lambda_eff_estimated: Option<f64>,
    /// Acceptance of (ω_log, λ_eff, μ*, f_ω); needs α²F, gap and Tc.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<ParameterAcceptance>,
    /// Heating and ionic-conduction flags.
    pub artifacts: ArtifactReport,
}

/// Derives ω_log, f_ω, 2Δ/(kB Tc) and λ_eff from whichever measurements
/// are present and judges the inferred parameter set against `policy`.
pub fn analyze_experimental_data(
    data: &ExperimentalData,
    mu_star: f64,
    policy: &AcceptancePolicy,
) -> Result<ExperimentalAnalysis, RtscError> {
    let mut analysis = ExperimentalAnalysis {
        gap_mev: data.gap_mev,
        tc_transport_k: data.transport_tc_k,
        resistance_drop: data
            .transport_tc_k
            .map(|_| data.resistance_drop.unwrap_or(0.0)),
        artifacts: detect_artifacts(data.iv_sweep.as_ref(), data.resistance_curve.as_ref()),
        ..ExperimentalAnalysis::default()
    };

    if let Some(spectral) = &data.spectral {
        analysis.omega_log_mev = Some(omega_log_from_alpha2f(
            &spectral.frequencies_mev,
            &spectral.alpha2f,
        )?);
        analysis.f_omega = Some(f_omega_from_alpha2f(
            &spectral.frequencies_mev,
            &spectral.alpha2f,
            DEFAULT_OMEGA_CUTOFF_MEV,
        )?);
    }

    if let (Some(gap), Some(tc)) = (data.gap_mev, data.transport_tc_k) {
        analysis.gap_ratio = Some(gap_to_tc_ratio(gap, tc)?);
        let lambda = estimate_lambda_from_gap(gap, tc);
        analysis.lambda_eff_estimated = Some(lambda);
        if let (Some(omega_log), Some(f_omega)) = (analysis.omega_log_mev, analysis.f_omega) {
            analysis.validation = Some(validate_rtsc_parameters(
                omega_log, lambda, mu_star, f_omega, policy,
            ));
        }
    }
    Ok(analysis)
}
