use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use rtsc_exp::{run_analysis, AnalysisInputs, EvaluationPolicy};
use rtsc_theory::BCS_RATIO;

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Directory holding iv_4probe.csv, ac_susceptibility.csv and raman.csv.
    #[arg(long)]
    pub in_dir: PathBuf,
    /// Directory receiving report.json.
    #[arg(long)]
    pub out_dir: PathBuf,
    #[arg(long, default_value_t = 135.0)]
    pub omega_log_mev: f64,
    #[arg(long, default_value_t = 1.9)]
    pub lambda_h: f64,
    #[arg(long, default_value_t = 0.6)]
    pub lambda_plasmon: f64,
    #[arg(long, default_value_t = 0.25)]
    pub lambda_flat: f64,
    #[arg(long, default_value_t = 0.10)]
    pub mu_star: f64,
    /// 2Δ0/(kB Tc) used for the gap prediction.
    #[arg(long, default_value_t = BCS_RATIO)]
    pub two_delta_ratio: f64,
    /// Denominator form: rescaled or mcmillan.
    #[arg(long, default_value = "rescaled")]
    pub denominator: String,
    /// YAML evaluation policy; defaults apply to absent keys.
    #[arg(long)]
    pub policy: Option<PathBuf>,
}

pub fn run(args: &AnalyzeArgs) -> Result<(), Box<dyn Error>> {
    let inputs = AnalysisInputs {
        omega_log_mev: args.omega_log_mev,
        lambda_h: args.lambda_h,
        lambda_plasmon: args.lambda_plasmon,
        lambda_flat: args.lambda_flat,
        mu_star: args.mu_star,
        two_delta_ratio: args.two_delta_ratio,
        denominator: args.denominator.parse()?,
    };
    let policy = match &args.policy {
        Some(path) => EvaluationPolicy::load(path)?,
        None => EvaluationPolicy::default(),
    };
    let (report, path) = run_analysis(&inputs, &args.in_dir, &args.out_dir, &policy)?;
    println!("Wrote {}", path.display());
    println!("VERDICT: {}", report.verdict);
    Ok(())
}
