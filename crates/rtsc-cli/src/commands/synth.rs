use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use rtsc_core::to_canonical_json_bytes;
use rtsc_exp::{predict, AnalysisInputs, SyntheticMeasurements};
use rtsc_theory::{generate_synthetic_data, multi_channel_lambda, SyntheticParams};

#[derive(Args, Debug)]
pub struct SynthArgs {
    /// Directory receiving the CSV tables and synthetic.json.
    #[arg(long)]
    pub out_dir: PathBuf,
    /// Transition temperature to imprint; defaults to the demo prediction.
    #[arg(long)]
    pub tc: Option<f64>,
    /// Raman peak position; defaults to the demo prediction.
    #[arg(long)]
    pub two_delta_mev: Option<f64>,
    #[arg(long, default_value_t = 0.0)]
    pub noise: f64,
    #[arg(long, default_value_t = 0)]
    pub seed: u64,
}

pub fn run(args: &SynthArgs) -> Result<(), Box<dyn Error>> {
    let inputs = AnalysisInputs::default();
    let theory = predict(&inputs)?;
    let tc_k = args.tc.unwrap_or(theory.tc_pred_k);
    let recipe = SyntheticMeasurements {
        tc_k,
        two_delta_mev: args.two_delta_mev.unwrap_or(theory.two_delta0_mev),
        noise_level: args.noise,
        seed: args.seed,
    };
    for path in recipe.write_to(&args.out_dir)? {
        println!("Wrote {}", path.display());
    }

    let spectra = generate_synthetic_data(
        &SyntheticParams {
            omega_log_mev: inputs.omega_log_mev,
            lambda_eff: multi_channel_lambda(
                inputs.lambda_h,
                inputs.lambda_plasmon,
                inputs.lambda_flat,
            ),
            mu_star: inputs.mu_star,
            tc_k,
        },
        args.noise,
        args.seed,
    )?;
    let path = args.out_dir.join("synthetic.json");
    fs::write(&path, to_canonical_json_bytes(&spectra)?)?;
    println!("Wrote {}", path.display());
    Ok(())
}
