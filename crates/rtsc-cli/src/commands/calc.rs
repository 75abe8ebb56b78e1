use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use rtsc_core::errors::{ErrorInfo, RtscError};
use rtsc_core::{to_canonical_json_string, Provenance};
use rtsc_exp::{check_against_schema, parse_schema, CALC_SCHEMA};
use rtsc_theory::{
    compute_tc, validate_calc_inputs, DenominatorForm, OmegaLog, OmegaUnit, ParameterBounds,
    ThermalParameters,
};
use serde::Serialize;
use tracing::debug;

#[derive(Args, Debug)]
pub struct CalcArgs {
    /// Logarithmic average phonon frequency.
    #[arg(long, allow_negative_numbers = true)]
    pub omega_log: f64,
    /// Unit of --omega-log: meV or K.
    #[arg(long, default_value = "meV")]
    pub omega_units: String,
    /// Effective electron-phonon coupling λ.
    #[arg(long = "lambda-val", allow_negative_numbers = true)]
    pub lambda_val: f64,
    /// Coulomb pseudopotential μ*.
    #[arg(long, allow_negative_numbers = true)]
    pub mu_star: f64,
    /// Spectral shape factor f_ω.
    #[arg(long, allow_negative_numbers = true)]
    pub f_omega: f64,
    /// Denominator form: mcmillan or rescaled.
    #[arg(long, default_value = "mcmillan")]
    pub denominator: String,
    /// Optional YAML file overriding the physical bounds.
    #[arg(long)]
    pub bounds: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct CalcInputs {
    omega_log: f64,
    omega_units: String,
    lambda: f64,
    mu_star: f64,
    f_omega: f64,
    denominator_form: DenominatorForm,
}

#[derive(Debug, Serialize)]
struct Derived {
    #[serde(rename = "omega_log_K")]
    omega_log_k: f64,
    denominator: f64,
}

#[derive(Debug, Serialize)]
struct Results {
    #[serde(rename = "Tc_K")]
    tc_k: f64,
}

#[derive(Debug, Serialize)]
struct CalcOutput {
    provenance: Provenance,
    inputs: CalcInputs,
    derived: Derived,
    results: Results,
    status: &'static str,
}

fn load_bounds(path: &Option<PathBuf>) -> Result<ParameterBounds, RtscError> {
    let Some(path) = path else {
        return Ok(ParameterBounds::default());
    };
    let raw =
        fs::read_to_string(path).map_err(|err| RtscError::missing_input("bounds", path, &err))?;
    debug!(path = %path.display(), "loading parameter bounds");
    serde_yaml::from_str(&raw)
        .map_err(|err| RtscError::Serde(ErrorInfo::new("yaml-deserialize", err.to_string())))
}

pub fn run(args: &CalcArgs) -> Result<(), Box<dyn Error>> {
    let unit: OmegaUnit = args.omega_units.parse()?;
    let form: DenominatorForm = args.denominator.parse()?;
    let bounds = load_bounds(&args.bounds)?;
    let params = ThermalParameters {
        omega_log: OmegaLog {
            value: args.omega_log,
            unit,
        },
        mu_star: args.mu_star,
        f_omega: args.f_omega,
    };
    validate_calc_inputs(&params, args.lambda_val, &bounds)?;
    let result = compute_tc(&params, args.lambda_val, form)?;

    let output = CalcOutput {
        provenance: result.provenance().clone(),
        inputs: CalcInputs {
            omega_log: args.omega_log,
            omega_units: args.omega_units.clone(),
            lambda: args.lambda_val,
            mu_star: args.mu_star,
            f_omega: args.f_omega,
            denominator_form: form,
        },
        derived: Derived {
            omega_log_k: result.omega_log_k(),
            denominator: result.denominator(),
        },
        results: Results {
            tc_k: result.tc_k(),
        },
        status: "ok",
    };
    let payload = serde_json::to_value(&output)?;
    check_against_schema(&payload, &parse_schema(CALC_SCHEMA)?)?;
    println!("{}", to_canonical_json_string(&payload)?);
    Ok(())
}
