use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use rtsc_core::errors::RtscError;
use rtsc_core::{from_json_slice, to_canonical_json_string};
use rtsc_theory::{analyze_experimental_data, AcceptancePolicy, ExperimentalData, ASSUMED_MU_STAR};

#[derive(Args, Debug)]
pub struct ExperimentArgs {
    /// JSON file with any of: spectral, gap_mev, transport_tc_k,
    /// resistance_drop, iv_sweep, resistance_curve.
    #[arg(long)]
    pub input: PathBuf,
    /// μ* assumed when judging the inferred parameter set.
    #[arg(long, default_value_t = ASSUMED_MU_STAR)]
    pub mu_star: f64,
}

pub fn run(args: &ExperimentArgs) -> Result<(), Box<dyn Error>> {
    let bytes = fs::read(&args.input)
        .map_err(|err| RtscError::missing_input("measurements", &args.input, &err))?;
    let data: ExperimentalData = from_json_slice(&bytes)?;
    let analysis = analyze_experimental_data(&data, args.mu_star, &AcceptancePolicy::default())?;
    println!("{}", to_canonical_json_string(&analysis)?);
    Ok(())
}
