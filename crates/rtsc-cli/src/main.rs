use std::error::Error;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use commands::{
    analyze::{self, AnalyzeArgs},
    calc::{self, CalcArgs},
    experiment::{self, ExperimentArgs},
    sensitivity::{self, SensitivityArgs},
    synth::{self, SynthArgs},
    version::{self, VersionArgs},
};
use rtsc_core::errors::RtscError;
use rtsc_core::logging::init_tracing;
use rtsc_core::to_canonical_json_string;
use serde_json::json;

mod commands;

/// Exit status for every reported failure.
const FAILURE_STATUS: u8 = 2;

#[derive(Parser, Debug)]
#[command(name = "rtsc", about = "Room-temperature superconductor Tc calculator and validator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute Tc from Allen-Dynes inputs with strict physical validation.
    Calc(CalcArgs),
    /// Evaluate a measurement directory against the theoretical prediction.
    Analyze(AnalyzeArgs),
    /// Tc sensitivities, λ optimisation and (ω_log, λ) maps.
    Sensitivity(SensitivityArgs),
    /// Write synthetic measurement tables and spectra.
    Synth(SynthArgs),
    /// Print version information.
    Version(VersionArgs),
    /// Infer ω_log, f_ω and λ_eff from measured spectra, gap and transport Tc.
    Experiment(ExperimentArgs),
}

fn error_payload(err: &(dyn Error + 'static)) -> serde_json::Value {
    if let Some(rtsc) = err.downcast_ref::<RtscError>() {
        return json!({
            "error": rtsc.info().message,
            "kind": rtsc.kind(),
            "code": rtsc.info().code,
            "status": "error",
        });
    }
    if let Some(usage) = err.downcast_ref::<clap::Error>() {
        return json!({
            "error": usage.to_string().trim_end(),
            "kind": "usage",
            "code": "invalid-arguments",
            "status": "error",
        });
    }
    json!({
        "error": err.to_string(),
        "kind": "io",
        "code": "io-error",
        "status": "error",
    })
}

fn fail(err: &(dyn Error + 'static)) -> ExitCode {
    let payload = error_payload(err);
    match to_canonical_json_string(&payload) {
        Ok(text) => eprintln!("{text}"),
        Err(_) => eprintln!("{payload}"),
    }
    ExitCode::from(FAILURE_STATUS)
}

fn main() -> ExitCode {
    init_tracing();
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => return fail(&err),
    };
    let result = match cli.command {
        Command::Calc(args) => calc::run(&args),
        Command::Analyze(args) => analyze::run(&args),
        Command::Sensitivity(args) => sensitivity::run(&args),
        Command::Synth(args) => synth::run(&args),
        Command::Version(args) => version::run(&args),
        Command::Experiment(args) => experiment::run(&args),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => fail(err.as_ref()),
    }
}
