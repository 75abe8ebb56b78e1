use std::error::Error;

use clap::Args;
use rtsc_core::to_canonical_json_string;
use rtsc_theory::{
    optimize_lambda, parameter_space_map, sensitivity_analysis, BaseParameters,
    OptimalParameters, ParameterMap, SensitivityReport,
};
use serde::Serialize;

#[derive(Args, Debug)]
pub struct SensitivityArgs {
    #[arg(long, default_value_t = 140.0)]
    pub omega_log_mev: f64,
    #[arg(long, default_value_t = 2.7)]
    pub lambda_eff: f64,
    #[arg(long, default_value_t = 0.10)]
    pub mu_star: f64,
    /// Fractional step for the central differences.
    #[arg(long, default_value_t = 0.1)]
    pub variation: f64,
    /// Also search λ ∈ [1, 4] for this Tc in K.
    #[arg(long)]
    pub target_tc: Option<f64>,
    /// Also emit an N×N (ω_log, λ) Tc map.
    #[arg(long)]
    pub map_resolution: Option<usize>,
}

#[derive(Debug, Serialize)]
struct SensitivityOutput {
    sensitivity: SensitivityReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    optimum: Option<OptimalParameters>,
    #[serde(skip_serializing_if = "Option::is_none")]
    map: Option<ParameterMap>,
}

pub fn run(args: &SensitivityArgs) -> Result<(), Box<dyn Error>> {
    let base = BaseParameters {
        omega_log_mev: args.omega_log_mev,
        lambda_eff: args.lambda_eff,
        mu_star: args.mu_star,
    };
    let optimum = args
        .target_tc
        .map(|tc| optimize_lambda(tc, args.omega_log_mev, args.mu_star))
        .transpose()?;
    let map = args
        .map_resolution
        .map(|n| parameter_space_map((80.0, 200.0), (1.5, 3.5), n, args.mu_star))
        .transpose()?;
    let output = SensitivityOutput {
        sensitivity: sensitivity_analysis(&base, args.variation)?,
        optimum,
        map,
    };
    println!("{}", to_canonical_json_string(&output)?);
    Ok(())
}
