use std::fs;
use std::path::{Path, PathBuf};

use rtsc_core::errors::{ErrorInfo, RtscError};
use rtsc_core::to_canonical_json_bytes;
use rtsc_theory::{
    allen_dynes_tc_multichannel, calculate_tc, two_delta0_mev, CouplingParameters,
    DenominatorForm, BCS_RATIO,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::outcome::{ValidationOutcome, Verdict};
use crate::policy::EvaluationPolicy;
use crate::raman::evaluate_raman_gap;
use crate::schema::{check_against_schema, parse_schema, REPORT_SCHEMA};
use crate::susceptibility::evaluate_susceptibility;
use crate::tables::{
    read_table, RamanRow, SusceptibilityRow, TransportRow, RAMAN_FILE, SUSCEPTIBILITY_FILE,
    TRANSPORT_FILE,
};
use crate::transport::evaluate_transport;

/// File written into the output directory.
pub const REPORT_FILE: &str = "report.json";

/// Theoretical inputs of an analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisInputs {
    /// ω_log in meV.
    pub omega_log_mev: f64,
    /// Hydrogen-mode coupling.
    pub lambda_h: f64,
    /// Plasmon coupling.
    pub lambda_plasmon: f64,
    /// Flat-band coupling.
    pub lambda_flat: f64,
    /// Coulomb pseudopotential.
    pub mu_star: f64,
    /// 2Δ0/(kB Tc) used to predict the gap.
    pub two_delta_ratio: f64,
    /// Denominator form for the Tc prediction.
    #[serde(default = "AnalysisInputs::default_denominator")]
    pub denominator: DenominatorForm,
}

impl AnalysisInputs {
    const fn default_denominator() -> DenominatorForm {
        DenominatorForm::Rescaled
    }
}

impl Default for AnalysisInputs {
    /// Hydride demo parameters.
    fn default() -> Self {
        Self {
            omega_log_mev: 135.0,
            lambda_h: 1.9,
            lambda_plasmon: 0.6,
            lambda_flat: 0.25,
            mu_star: 0.10,
            two_delta_ratio: BCS_RATIO,
            denominator: Self::default_denominator(),
        }
    }
}

/// Predicted Tc and gap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TheoryPrediction {
    /// Predicted transition temperature.
    #[serde(rename = "Tc_pred_K")]
    pub tc_pred_k: f64,
    /// Predicted full gap 2Δ0.
    #[serde(rename = "twoDelta0_meV")]
    pub two_delta0_mev: f64,
}

/// Contents of `report.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Parameters the prediction was made from.
    pub inputs: AnalysisInputs,
    /// Theoretical prediction.
    pub theory: TheoryPrediction,
    /// Four-point transport outcome.
    pub transport: ValidationOutcome,
    /// AC susceptibility outcome.
    pub susceptibility: ValidationOutcome,
    /// Raman gap outcome.
    pub raman: ValidationOutcome,
    /// Aggregate verdict.
    pub verdict: Verdict,
}

/// Predicts Tc and 2Δ0 for `inputs`.
pub fn predict(inputs: &AnalysisInputs) -> Result<TheoryPrediction, RtscError> {
    let couplings =
        CouplingParameters::new(inputs.lambda_h, inputs.lambda_plasmon, inputs.lambda_flat)?;
    let tc_pred_k = match inputs.denominator {
        DenominatorForm::Rescaled => {
            allen_dynes_tc_multichannel(inputs.omega_log_mev, &couplings, inputs.mu_star)
        }
        DenominatorForm::McMillan => {
            calculate_tc(inputs.omega_log_mev, couplings.lambda_eff(), inputs.mu_star)
        }
    };
    Ok(TheoryPrediction {
        tc_pred_k,
        two_delta0_mev: two_delta0_mev(tc_pred_k, inputs.two_delta_ratio),
    })
}

/// Loads the three measurement tables from `in_dir`, evaluates them against
/// the prediction and writes `report.json` into `out_dir`.
///
/// Returns the report and the path it was written to.
pub fn run_analysis(
    inputs: &AnalysisInputs,
    in_dir: &Path,
    out_dir: &Path,
    policy: &EvaluationPolicy,
) -> Result<(AnalysisReport, PathBuf), RtscError> {
    let transport_rows: Vec<TransportRow> = read_table(&in_dir.join(TRANSPORT_FILE))?;
    let chi_rows: Vec<SusceptibilityRow> = read_table(&in_dir.join(SUSCEPTIBILITY_FILE))?;
    let raman_rows: Vec<RamanRow> = read_table(&in_dir.join(RAMAN_FILE))?;

    let theory = predict(inputs)?;
    let transport = evaluate_transport(&transport_rows, Some(theory.tc_pred_k), &policy.transport);
    let susceptibility =
        evaluate_susceptibility(&chi_rows, Some(theory.tc_pred_k), &policy.susceptibility);
    let raman = evaluate_raman_gap(&raman_rows, theory.two_delta0_mev, &policy.raman);
    let verdict = Verdict::from_outcomes([&transport, &susceptibility, &raman]);

    let report = AnalysisReport {
        inputs: inputs.clone(),
        theory,
        transport,
        susceptibility,
        raman,
        verdict,
    };
    let path = write_report(&report, out_dir)?;
    info!(path = %path.display(), %verdict, "analysis report written");
    Ok((report, path))
}

/// Checks `report` against the shipped schema and writes it as canonical JSON.
pub fn write_report(report: &AnalysisReport, out_dir: &Path) -> Result<PathBuf, RtscError> {
    let value = serde_json::to_value(report)
        .map_err(|err| RtscError::Serde(ErrorInfo::new("json-serialize", err.to_string())))?;
    check_against_schema(&value, &parse_schema(REPORT_SCHEMA)?)?;

    let io_error = |path: &Path, err: std::io::Error| {
        RtscError::Serde(
            ErrorInfo::new("report-write", format!("cannot write {}", path.display()))
                .with_path(path)
                .with_hint(err.to_string()),
        )
    };
    fs::create_dir_all(out_dir).map_err(|err| io_error(out_dir, err))?;
    let path = out_dir.join(REPORT_FILE);
    fs::write(&path, to_canonical_json_bytes(&value)?).map_err(|err| io_error(&path, err))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_prediction_is_room_temperature() {
        let theory = predict(&AnalysisInputs::default()).unwrap();
        assert!((theory.tc_pred_k - 379.4).abs() < 0.5, "{theory:?}");
        assert!((theory.two_delta0_mev - 115.4).abs() < 0.5, "{theory:?}");
    }

    #[test]
    fn mcmillan_prediction_is_lower() {
        let rescaled = predict(&AnalysisInputs::default()).unwrap();
        let mcmillan = predict(&AnalysisInputs {
            denominator: DenominatorForm::McMillan,
            ..AnalysisInputs::default()
        })
        .unwrap();
        assert!(mcmillan.tc_pred_k < rescaled.tc_pred_k);
    }

    #[test]
    fn negative_channel_is_rejected() {
        let inputs = AnalysisInputs {
            lambda_flat: -0.1,
            ..AnalysisInputs::default()
        };
        assert_eq!(predict(&inputs).unwrap_err().kind(), "out_of_range_parameter");
    }
}
